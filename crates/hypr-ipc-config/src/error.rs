use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to parse KDL")]
    #[diagnostic(code(hypr_ipc::config::parse_error))]
    ParseError {
        #[source_code]
        src: String,
        #[label("here")]
        span: miette::SourceSpan,
        #[source]
        source: kdl::KdlError,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(hypr_ipc::config::invalid))]
    Invalid { message: String },

    #[error("Missing required argument: {field}")]
    #[diagnostic(code(hypr_ipc::config::missing_field))]
    MissingField { field: String },

    #[error("Unknown command `{name}` in batch \"{batch}\"")]
    #[diagnostic(
        code(hypr_ipc::config::unknown_command),
        help("valid commands: dispatch, keyword, reload, kill, setcursor, output-create, output-remove, switchxkblayout, seterror, seterror-disable, notify, dismissnotify, raw")
    )]
    UnknownCommand { batch: String, name: String },

    #[error("Batch \"{name}\" is defined more than once")]
    #[diagnostic(code(hypr_ipc::config::duplicate_batch))]
    DuplicateBatch { name: String },

    #[error("Batch \"{name}\" has no commands")]
    #[diagnostic(code(hypr_ipc::config::empty_batch))]
    EmptyBatch { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
