use std::thread::{self, JoinHandle};

use crate::core::errors::BridgeError;
use crate::runtime::context::GraphicsContext;

pub type EntryPoint = Box<dyn FnOnce(&GraphicsContext, &[String]) + Send + 'static>;

/// Runs the application's entry point on a dedicated user thread.
#[derive(Default)]
pub struct UserRuntime {
    entry: Option<EntryPoint>,
    args: Vec<String>,
}

/// Posts shutdown to the GUI thread when the user thread ends, including
/// when the entry point panics.
struct ShutdownOnExit {
    context: GraphicsContext,
}

impl Drop for ShutdownOnExit {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::error!("runtime: user entry point panicked, shutting down GUI thread");
        } else {
            tracing::info!("runtime: user entry point returned, shutting down GUI thread");
        }

        if let Err(err) = self.context.request_shutdown() {
            tracing::debug!("runtime: GUI thread already gone: {err}");
        }
    }
}

impl UserRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entry_point<F>(mut self, entry: F) -> Self
    where
        F: FnOnce(&GraphicsContext, &[String]) + Send + 'static,
    {
        self.entry = Some(Box::new(entry));
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Starts the user thread.
    ///
    /// # Errors
    ///
    /// [`BridgeError::NoEntryPoint`] if no entry point was registered, or an
    /// IO error if the thread could not be spawned.
    pub fn spawn(self, context: GraphicsContext) -> Result<JoinHandle<()>, BridgeError> {
        let entry = self.entry.ok_or(BridgeError::NoEntryPoint)?;
        let args = self.args;
        let name = context.config().user_thread_name.clone();

        let handle = thread::Builder::new().name(name).spawn(move || {
            let guard = ShutdownOnExit { context };
            tracing::info!("runtime: user entry point started");

            entry(&guard.context, &args);
        })?;

        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BridgeConfig;
    use crate::controllers::gui_owner::LoopControl;
    use crate::controllers::ports::waker::NoopWaker;
    use crate::presenters::headless::HeadlessBackend;
    use crate::runtime::context::connect;
    use std::sync::Arc;
    use std::sync::mpsc;

    #[test]
    fn test_spawn_without_entry_point_fails() {
        let (context, _owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));

        let result = UserRuntime::new().spawn(context);

        assert!(matches!(result, Err(BridgeError::NoEntryPoint)));
    }

    #[test]
    fn test_entry_point_receives_args_and_runs_on_named_thread() {
        let (context, _owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        let (tx, rx) = mpsc::channel();

        let handle = UserRuntime::new()
            .args(["prog", "--fast"])
            .entry_point(move |_ctx, args| {
                let name = thread::current().name().map(str::to_string);
                tx.send((name, args.to_vec())).unwrap();
            })
            .spawn(context)
            .unwrap();
        handle.join().unwrap();

        let (name, args) = rx.recv().unwrap();
        assert_eq!(name.as_deref(), Some("user"));
        assert_eq!(args, vec!["prog".to_string(), "--fast".to_string()]);
    }

    #[test]
    fn test_returning_entry_point_posts_shutdown() {
        let (context, mut owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        // Keeps the channel open, so only an explicit shutdown stops the pump.
        let observer = context.clone();

        let handle = UserRuntime::new()
            .entry_point(|_ctx, _args| {})
            .spawn(context)
            .unwrap();
        handle.join().unwrap();

        let mut backend = HeadlessBackend::default();
        assert_eq!(owner.pump(&mut backend), LoopControl::Exit);
        drop(observer);
    }

    #[test]
    fn test_panicking_entry_point_still_posts_shutdown() {
        let (context, mut owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        let observer = context.clone();

        let handle = UserRuntime::new()
            .entry_point(|_ctx, _args| panic!("user code failed"))
            .spawn(context)
            .unwrap();
        assert!(handle.join().is_err());

        let mut backend = HeadlessBackend::default();
        assert_eq!(owner.pump(&mut backend), LoopControl::Exit);
        drop(observer);
    }

    #[test]
    fn test_pump_continues_while_entry_point_runs() {
        let (context, mut owner) = connect(BridgeConfig::default(), Arc::new(NoopWaker));
        let (release, wait) = mpsc::channel::<()>();

        let handle = UserRuntime::new()
            .entry_point(move |_ctx, _args| {
                let _ = wait.recv();
            })
            .spawn(context)
            .unwrap();

        let mut backend = HeadlessBackend::default();
        assert_eq!(owner.pump(&mut backend), LoopControl::Continue);

        release.send(()).unwrap();
        handle.join().unwrap();
    }
}
