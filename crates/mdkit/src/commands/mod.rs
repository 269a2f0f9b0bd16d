//! CLI command implementations.

pub(crate) mod init;
pub(crate) mod render;
mod settings;
pub(crate) mod template;

pub(crate) use init::InitArgs;
pub(crate) use render::RenderArgs;
pub(crate) use template::TemplateArgs;
