//! Window host: winit event loop driving the shell and the wry engine.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use nimbus_common::events::ShellEvent;
use nimbus_common::{NimbusError, WindowSize};
use nimbus_engine::wry_backend::WryEngine;
use nimbus_engine::UrlPatternFilter;
use nimbus_persistence::Store;
use nimbus_shell::{BrowserShell, Settings, ShellConfig, TabOptions};

use crate::cli::Args;

/// How often the shell is pumped while idle.
const PUMP_INTERVAL: Duration = Duration::from_millis(50);

pub struct NimbusApp {
    args: Args,
    window: Option<Arc<Window>>,
    shell: Option<BrowserShell<WryEngine<Arc<Window>>>>,
    events_rx: Option<broadcast::Receiver<ShellEvent>>,
}

impl NimbusApp {
    pub fn new(args: Args) -> Self {
        Self {
            args,
            window: None,
            shell: None,
            events_rx: None,
        }
    }

    fn startup_tabs(&self, settings: &Settings, session: Vec<String>) -> Vec<String> {
        if let Some(url) = &self.args.url {
            return vec![url.clone()];
        }
        let restore = self.args.restore || settings.startup_behavior == "restore";
        if restore && !session.is_empty() {
            return session;
        }
        vec![settings.homepage.clone()]
    }
}

impl ApplicationHandler for NimbusApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Nimbus")
            .with_inner_size(LogicalSize::new(1280.0, 800.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let store = Store::json();
        let settings = Settings::load(&store);
        let session: Vec<String> = store.read("session", Vec::new());
        let filter = Arc::new(UrlPatternFilter::ad_blocker(settings.ad_block));
        let engine = WryEngine::new(Arc::clone(&window), filter);

        let size = window.inner_size();
        let mut shell = BrowserShell::new(
            engine,
            store,
            ShellConfig {
                homepage: settings.homepage.clone(),
                ..ShellConfig::default()
            },
            WindowSize::new(size.width, size.height),
        );
        self.events_rx = Some(shell.subscribe());

        let options = TabOptions {
            incognito: self.args.incognito,
        };
        for url in self.startup_tabs(&settings, session) {
            if let Err(e) = shell.create_tab(&url, options) {
                warn!(url, "Startup tab failed: {e}");
            }
        }

        info!(tabs = shell.tab_count(), "Window ready");
        self.window = Some(window);
        self.shell = Some(shell);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(shell) = self.shell.as_mut() else {
            return;
        };
        match event {
            WindowEvent::Resized(size) => {
                shell.handle_resize(WindowSize::new(size.width, size.height));
            }
            WindowEvent::CloseRequested => {
                shell.persist_session();
                event_loop.exit();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(shell) = self.shell.as_mut() {
            shell.pump(Instant::now());
        }

        let mut shutdown = false;
        if let Some(rx) = self.events_rx.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(ShellEvent::ShutdownRequested) => {
                        shutdown = true;
                    }
                    Ok(event) => debug!(?event, "shell event"),
                    Err(TryRecvError::Lagged(missed)) => {
                        warn!(missed, "presentation consumer lagged");
                    }
                    Err(_) => break,
                }
            }
        }
        if shutdown {
            if let Some(shell) = self.shell.as_ref() {
                shell.persist_session();
            }
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + PUMP_INTERVAL));
    }
}

pub fn run(args: Args) -> nimbus_common::Result<()> {
    let event_loop = EventLoop::new().map_err(|e| NimbusError::Other(e.to_string()))?;
    let mut app = NimbusApp::new(args);

    info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| NimbusError::Other(e.to_string()))
}
