use std::env;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the gateway listens on (`SERVER_ADDR`, default `0.0.0.0:3000`).
    pub addr: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }
}
