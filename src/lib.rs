#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod input;
pub mod output;
pub mod render;
pub mod select;
pub mod shell;
pub mod transport;
pub mod value;

pub use commands::{Command, Context};
pub use config::ShellConfig;
pub use dispatch::{Dispatch, Registry};
pub use environment::Environment;
pub use error::ShellError;
pub use input::{FileLines, LineSource};
pub use render::{NullRenderer, Renderer, TerminalRenderer};
pub use select::select;
pub use shell::Shell;
pub use transport::{HttpResponse, HttpTransport, Method, Transport};
pub use value::{Host, Request, Response, Value, ValueType};
