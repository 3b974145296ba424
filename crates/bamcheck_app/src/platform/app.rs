use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use bamcheck_core::{update, AppState, Msg};
use bamcheck_logging::{bamcheck_info, bamcheck_trace, bamcheck_warn};
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::StreamExt;

use super::config::{self, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::{logging, ui};

pub fn run_app() {
    let (app_config, load_error) = config::load_or_default(Path::new(CONFIG_FILENAME));
    logging::initialize(&app_config.log);
    if let Some(err) = load_error {
        bamcheck_warn!("Using default configuration: {:#}", err);
    }
    bamcheck_info!("Starting {}", app_config.window.title);

    let window = WindowBuilder::new()
        .with_title(app_config.window.title.clone())
        .with_resizable(true)
        .with_inner_size(LogicalSize::new(
            app_config.window.width,
            app_config.window.height,
        ));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::default().with_window(window))
        .with_context(app_config)
        .launch(App);
}

/// Single consumer queue feeding `update`. The receiver is taken once by the
/// dispatch loop; the sender is shared with UI handlers and the engine relay.
#[derive(Clone)]
struct Inbox {
    tx: UnboundedSender<Msg>,
    rx: Rc<RefCell<Option<UnboundedReceiver<Msg>>>>,
}

impl Inbox {
    fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx: Rc::new(RefCell::new(Some(rx))),
        }
    }

    fn take_receiver(&self) -> Option<UnboundedReceiver<Msg>> {
        self.rx.borrow_mut().take()
    }
}

#[component]
fn App() -> Element {
    let app_config = use_context::<AppConfig>();
    let extensions = app_config.extensions.clone();
    let state = use_signal(move || AppState::with_extensions(extensions.into()));
    let inbox = use_hook(Inbox::new);

    let runner = use_hook({
        let tx = inbox.tx.clone();
        let app_config = app_config.clone();
        move || Rc::new(EffectRunner::new(app_config.engine_config(), tx))
    });

    use_future({
        let inbox = inbox.clone();
        move || {
            let inbox = inbox.clone();
            let runner = runner.clone();
            async move {
                let mut state = state;
                let Some(mut rx) = inbox.take_receiver() else {
                    return;
                };
                while let Some(msg) = rx.next().await {
                    dispatch(&mut state, msg, &runner);
                }
            }
        }
    });

    let tx = inbox.tx.clone();
    let send = use_callback(move |msg: Msg| {
        let _ = tx.unbounded_send(msg);
    });

    let view = state.read().view();

    rsx! {
        style { {ui::constants::STYLES} }
        ui::layout::Shell { view, on_msg: send }
    }
}

/// Applies `msg` and every message produced by running its effects.
fn dispatch(state: &mut Signal<AppState>, msg: Msg, runner: &EffectRunner) {
    let mut pending = VecDeque::from([msg]);
    while let Some(msg) = pending.pop_front() {
        bamcheck_trace!("dispatch {:?}", msg);
        let current = state.peek().clone();
        let (mut next, effects) = update(current, msg);
        if next.consume_dirty() {
            state.set(next);
        }
        pending.extend(runner.run(effects));
    }
}
