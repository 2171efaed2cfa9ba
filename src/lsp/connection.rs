//! Connection lifecycle of the language server

use tracing::{error, info};

/// Starts the language server process when the client is ready for it
#[cfg_attr(test, mockall::automock)]
pub trait ServerStarter {
    fn start_server(&self);
}

/// Notified once a server connection is established
#[cfg_attr(test, mockall::automock)]
pub trait ConnectedListener<S: 'static> {
    fn on_connected(&self, server: &S);
}

/// Receives connection progress and failures
#[cfg_attr(test, mockall::automock)]
pub trait ConnectionReporter {
    fn report(&self, message: &str);
    fn error(&self, error: &anyhow::Error);
}

impl<F: Fn()> ServerStarter for F {
    fn start_server(&self) {
        self()
    }
}

impl<S: 'static, F: Fn(&S)> ConnectedListener<S> for F {
    fn on_connected(&self, server: &S) {
        self(server)
    }
}

/// Tracks whether a server is connected and remembers its handle
pub struct ConnectionManager<S: 'static> {
    connected: bool,
    server: Option<S>,
    starter: Option<Box<dyn ServerStarter>>,
    listener: Option<Box<dyn ConnectedListener<S>>>,
    reporter: Option<Box<dyn ConnectionReporter>>,
}

impl<S: 'static> Default for ConnectionManager<S> {
    fn default() -> Self {
        Self {
            connected: false,
            server: None,
            starter: None,
            listener: None,
            reporter: None,
        }
    }
}

impl<S: 'static> ConnectionManager<S> {
    pub fn new(
        starter: Option<Box<dyn ServerStarter>>,
        listener: Option<Box<dyn ConnectedListener<S>>>,
    ) -> Self {
        Self {
            starter,
            listener,
            ..Self::default()
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ConnectionReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Handle of the most recently connected server, kept after disconnects
    pub fn server(&self) -> Option<&S> {
        self.server.as_ref()
    }

    pub fn on_connected(&mut self, server: S) {
        info!("Language server connected");
        self.connected = true;
        let server = self.server.insert(server);

        if let Some(listener) = &self.listener {
            listener.on_connected(server);
        }
    }

    /// Marks the connection as lost. Listeners are not notified.
    pub fn on_disconnected(&mut self) {
        info!("Language server disconnected");
        self.connected = false;
    }

    /// Asks the starter to launch the server. Repeated calls start it again.
    pub fn request_server_start(&self) {
        match &self.starter {
            Some(starter) => {
                info!("Requesting language server start");
                starter.start_server();
            }
            None => info!("No server starter registered, ignoring start request"),
        }
    }

    pub fn report_progress(&self, message: &str) {
        info!("Connection progress: {}", message);
        if let Some(reporter) = &self.reporter {
            reporter.report(message);
        }
    }

    pub fn report_error(&self, err: anyhow::Error) {
        error!("Connection failed: {:#}", err);
        if let Some(reporter) = &self.reporter {
            reporter.error(&err);
        }
    }
}
