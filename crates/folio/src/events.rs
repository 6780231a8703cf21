use crate::config::Config;
use crate::contact::ContactError;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// An edited config file that loaded and validated.
    ConfigReload(Box<Config>),
    Delivered(Result<(), ContactError>),
}
