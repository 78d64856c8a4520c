use crate::{
    db::{ConnectionError, ConnectionString},
    error::InternalError,
    obs::sink::{self, MetricsEvent},
};
use std::time::Duration;

///
/// ConnectionOptions
///
/// Provider-independent settings a connection is opened with.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionOptions {
    connection_string: ConnectionString,
    command_timeout: Option<Duration>,
}

impl ConnectionOptions {
    pub fn new(connection_string: &str) -> Result<Self, InternalError> {
        Self::from_connection_string(ConnectionString::parse(connection_string)?)
    }

    pub fn from_connection_string(
        connection_string: ConnectionString,
    ) -> Result<Self, InternalError> {
        if connection_string.is_empty() {
            return Err(ConnectionError::EmptyConnectionString.into());
        }

        Ok(Self {
            connection_string,
            command_timeout: None,
        })
    }

    #[must_use]
    pub const fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = Some(timeout);
        self
    }

    // Swap the connection string, keeping every other option.
    pub(crate) fn with_connection_string(mut self, connection_string: ConnectionString) -> Self {
        self.connection_string = connection_string;
        self
    }

    #[must_use]
    pub const fn connection_string(&self) -> &ConnectionString {
        &self.connection_string
    }

    #[must_use]
    pub const fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout
    }
}

///
/// ConnectionState
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionState {
    Closed,
    Open,
}

///
/// RelationalConnection
///
/// Opaque database connection handle. Opens are reference counted: only the
/// first `open` and the matching last `close` change state.
///

#[derive(Debug)]
pub struct RelationalConnection {
    options: ConnectionOptions,
    open_count: usize,
}

impl RelationalConnection {
    #[must_use]
    pub const fn new(options: ConnectionOptions) -> Self {
        Self {
            options,
            open_count: 0,
        }
    }

    /// Open the connection; returns `true` if this call changed the state.
    pub fn open(&mut self) -> bool {
        self.open_count += 1;
        if self.open_count > 1 {
            return false;
        }

        tracing::debug!(
            connection = %self.options.connection_string.redacted(),
            "opening connection"
        );
        sink::record(MetricsEvent::ConnectionOpened);

        true
    }

    /// Release one open; returns `true` if this call closed the connection.
    pub fn close(&mut self) -> Result<bool, InternalError> {
        if self.open_count == 0 {
            return Err(ConnectionError::NotOpen.into());
        }

        self.open_count -= 1;
        if self.open_count > 0 {
            return Ok(false);
        }

        tracing::debug!(
            connection = %self.options.connection_string.redacted(),
            "closing connection"
        );
        sink::record(MetricsEvent::ConnectionClosed);

        Ok(true)
    }

    #[must_use]
    pub const fn state(&self) -> ConnectionState {
        if self.open_count > 0 {
            ConnectionState::Open
        } else {
            ConnectionState::Closed
        }
    }

    #[must_use]
    pub const fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    #[must_use]
    pub const fn connection_string(&self) -> &ConnectionString {
        self.options.connection_string()
    }

    #[must_use]
    pub const fn command_timeout(&self) -> Option<Duration> {
        self.options.command_timeout()
    }

    /// A new, closed connection with the same options.
    #[must_use]
    pub fn try_clone(&self) -> Self {
        Self::new(self.options.clone())
    }
}
