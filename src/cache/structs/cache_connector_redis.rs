use redis::aio::MultiplexedConnection;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct CacheConnectorRedis {
    pub(crate) connection: MultiplexedConnection,
    pub(crate) endpoint: String,
    pub(crate) command_timeout: Duration,
}

impl fmt::Debug for CacheConnectorRedis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConnectorRedis")
            .field("connection", &"<redis::aio::MultiplexedConnection>")
            .field("endpoint", &self.endpoint)
            .field("command_timeout", &self.command_timeout)
            .finish()
    }
}
