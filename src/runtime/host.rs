//! Component host.
//!
//! [`ComponentHost::attach`] subscribes a component to `AppSynced` and runs
//! its attach hook; the returned [`Mounted`] handle owns that wiring. The host
//! carries out every [`Reaction`]: paint ops go straight to the surface,
//! messages to the bus, and transitions become fades.
//!
//! # Fades
//!
//! ```text
//! transition(view) ─> RemoveClass(show) ─> sleep(fade) ─> Render(view) ─> AddClass(show)
//! ```
//!
//! The sleep runs as a `spawn_local` task. A newer transition supersedes the
//! pending one through its [`FadeTicket`](crate::ui::FadeTicket), and detaching
//! aborts it, so a detached component never paints again.

use crate::app::ApplicationState;
use crate::bus::{EventBus, Message, Signal, Subscription};
use crate::domain::{Result, SiteError};
use crate::ui::surface::{PaintOp, Surface, SHOW_CLASS};
use crate::ui::transition::{FadeTicket, FadeTransition};
use crate::ui::viewmodel::View;
use crate::ui::{Component, Interaction, Reaction};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Attaches components to a bus and a surface.
#[derive(Clone)]
pub struct ComponentHost {
    bus: EventBus,
    surface: Rc<dyn Surface>,
    fade_duration: Duration,
}

impl std::fmt::Debug for ComponentHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentHost")
            .field("fade_duration", &self.fade_duration)
            .finish_non_exhaustive()
    }
}

impl ComponentHost {
    #[must_use]
    pub fn new(bus: EventBus, surface: Rc<dyn Surface>, fade_duration: Duration) -> Self {
        Self {
            bus,
            surface,
            fade_duration,
        }
    }

    /// Attaches `component`: subscribes it to state syncs, then runs its
    /// attach hook.
    ///
    /// # Panics
    ///
    /// Fades are spawned with `spawn_local`; attach and every later publish
    /// must happen inside a `tokio::task::LocalSet`.
    #[must_use = "dropping the Mounted handle detaches the component"]
    pub fn attach(&self, component: impl Component + 'static) -> Mounted {
        let element = component.element().to_string();
        let inner = Rc::new(MountedInner {
            element,
            component: RefCell::new(Box::new(component)),
            bus: self.bus.clone(),
            surface: Rc::clone(&self.surface),
            fade_duration: self.fade_duration,
            fade: RefCell::new(FadeTransition::default()),
            pending_fade: RefCell::new(None),
            subscription: RefCell::new(None),
            detached: Cell::new(false),
        });

        let weak: Weak<MountedInner> = Rc::downgrade(&inner);
        let subscription = self.bus.subscribe(Signal::AppSynced, move |message| {
            let (Message::AppSynced(state), Some(mounted)) = (message, weak.upgrade()) else {
                return Ok(());
            };
            mounted.state_changed(state)
        });
        inner.subscription.replace(Some(subscription));

        tracing::debug!(element = %inner.element, "component attached");
        let reaction = inner.component.borrow_mut().on_attach();
        inner.apply(reaction);

        Mounted { inner }
    }
}

struct MountedInner {
    element: String,
    component: RefCell<Box<dyn Component>>,
    bus: EventBus,
    surface: Rc<dyn Surface>,
    fade_duration: Duration,
    fade: RefCell<FadeTransition>,
    pending_fade: RefCell<Option<JoinHandle<()>>>,
    subscription: RefCell<Option<Subscription>>,
    detached: Cell<bool>,
}

impl MountedInner {
    fn state_changed(self: &Rc<Self>, state: &ApplicationState) -> Result<()> {
        if self.detached.get() {
            return Ok(());
        }

        let reaction = {
            let mut component = self.component.try_borrow_mut().map_err(|_| {
                SiteError::Subscriber(format!("{} is already handling a hook", self.element))
            })?;
            component.on_state_changed(state)
        };

        tracing::trace!(element = %self.element, "state change handled");
        self.apply(reaction);
        Ok(())
    }

    /// Carries out a reaction. No component borrow may be held here: publishing
    /// can re-enter this component's handlers.
    fn apply(self: &Rc<Self>, reaction: Reaction) {
        let Reaction {
            paint,
            transition,
            publish,
        } = reaction;

        let renders_now = paint
            .iter()
            .any(|op| matches!(op, PaintOp::Render { element, .. } if *element == self.element));
        if renders_now && transition.is_none() {
            self.cancel_fade();
        }

        for op in paint {
            self.surface.paint(op);
        }
        if let Some(view) = transition {
            self.start_fade(view);
        }
        for message in publish {
            tracing::trace!(
                element = %self.element,
                signal = %message.signal(),
                "component publishing"
            );
            self.bus.publish(message);
        }
    }

    fn start_fade(self: &Rc<Self>, view: View) {
        let ticket = self.fade.borrow_mut().begin();
        self.surface
            .paint(PaintOp::remove_class(&self.element, SHOW_CLASS));

        let weak = Rc::downgrade(self);
        let delay = self.fade_duration;
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if let Some(mounted) = weak.upgrade() {
                mounted.finish_fade(ticket, view);
            }
        });

        if let Some(previous) = self.pending_fade.replace(Some(task)) {
            previous.abort();
        }
    }

    /// Drops the pending fade; an immediate render supersedes it.
    fn cancel_fade(&self) {
        self.fade.borrow_mut().cancel();
        if let Some(task) = self.pending_fade.take() {
            task.abort();
        }
    }

    fn finish_fade(&self, ticket: FadeTicket, view: View) {
        if self.detached.get() || !self.fade.borrow_mut().finish(ticket) {
            tracing::trace!(element = %self.element, "superseded fade dropped");
            return;
        }

        let scrolls = self
            .component
            .try_borrow()
            .is_ok_and(|component| component.scrolls_on_show());

        self.surface.paint(PaintOp::render(&self.element, view));
        if scrolls {
            self.surface.paint(PaintOp::ScrollToTop);
        }
        self.surface
            .paint(PaintOp::add_class(&self.element, SHOW_CLASS));
    }

    fn detach(&self) {
        if self.detached.replace(true) {
            return;
        }

        if let Some(subscription) = self.subscription.take() {
            subscription.dispose();
        }
        self.cancel_fade();

        if let Ok(mut component) = self.component.try_borrow_mut() {
            component.on_detach();
        }
        tracing::debug!(element = %self.element, "component detached");
    }
}

/// An attached component. Dropping it detaches the component.
pub struct Mounted {
    inner: Rc<MountedInner>,
}

impl std::fmt::Debug for Mounted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mounted")
            .field("element", &self.inner.element)
            .field("detached", &self.inner.detached.get())
            .finish_non_exhaustive()
    }
}

impl Mounted {
    #[must_use]
    pub fn element(&self) -> &str {
        &self.inner.element
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.inner.detached.get()
    }

    /// Whether a fade is waiting to render.
    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.inner.fade.borrow().is_pending()
    }

    /// Routes a user interaction to the component.
    pub fn dispatch(&self, interaction: &Interaction) {
        if self.inner.detached.get() {
            return;
        }
        let reaction = match self.inner.component.try_borrow_mut() {
            Ok(mut component) => component.on_interaction(interaction),
            Err(_) => {
                tracing::warn!(
                    element = %self.inner.element,
                    "interaction dropped, component busy"
                );
                return;
            }
        };
        self.inner.apply(reaction);
    }

    /// Unsubscribes the component, cancels its pending fade and runs its
    /// detach hook. Safe to call more than once.
    pub fn detach(&self) {
        self.inner.detach();
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.inner.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{PageFrame, RecordingSurface};
    use std::sync::Arc;
    use tokio::task::LocalSet;
    use tokio::time::Instant;

    const FADE: Duration = Duration::from_millis(500);

    fn selecting(page: &str) -> Arc<ApplicationState> {
        let mut state = ApplicationState::default();
        state.user.selected_page = Some(page.to_string());
        Arc::new(state)
    }

    fn host(surface: &Rc<RecordingSurface>) -> (EventBus, ComponentHost) {
        let bus = EventBus::new();
        let surface: Rc<dyn Surface> = Rc::clone(surface) as Rc<dyn Surface>;
        let host = ComponentHost::new(bus.clone(), surface, FADE);
        (bus, host)
    }

    #[tokio::test(start_paused = true)]
    async fn fade_renders_after_the_fade_duration() {
        LocalSet::new()
            .run_until(async {
                let surface = Rc::new(RecordingSurface::new());
                let (bus, host) = host(&surface);
                let mounted = host.attach(PageFrame::new("journal"));

                let start = Instant::now();
                bus.publish(Message::AppSynced(selecting("journal")));
                assert!(mounted.is_fading());
                assert!(surface.last_view("page-journal").is_none());

                tokio::time::sleep(FADE + Duration::from_millis(1)).await;

                let ops = surface.ops_for("page-journal");
                assert_eq!(ops.len(), 3);
                assert_eq!(ops[0].1, PaintOp::remove_class("page-journal", SHOW_CLASS));
                assert!(matches!(ops[1].1, PaintOp::Render { .. }));
                assert_eq!(ops[2].1, PaintOp::add_class("page-journal", SHOW_CLASS));
                assert!(ops[2].0 - ops[0].0 >= FADE);
                assert!(ops[0].0 - start < FADE);
                assert!(!mounted.is_fading());
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn newer_fade_supersedes_pending_one() {
        LocalSet::new()
            .run_until(async {
                let surface = Rc::new(RecordingSurface::new());
                let (bus, host) = host(&surface);
                let _mounted = host.attach(PageFrame::new("journal"));

                bus.publish(Message::AppSynced(selecting("journal")));
                tokio::time::sleep(Duration::from_millis(100)).await;
                bus.publish(Message::AppSynced(selecting("photos")));
                bus.publish(Message::AppSynced(selecting("journal")));

                tokio::time::sleep(FADE * 2).await;

                let renders = surface
                    .ops_for("page-journal")
                    .into_iter()
                    .filter(|(_, op)| {
                        matches!(
                            op,
                            PaintOp::Render {
                                view: View::Page { visible: true, .. },
                                ..
                            }
                        )
                    })
                    .count();
                assert_eq!(renders, 1);
                assert!(surface.has_class("page-journal", SHOW_CLASS));
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn detach_is_idempotent_and_stops_painting() {
        LocalSet::new()
            .run_until(async {
                let surface = Rc::new(RecordingSurface::new());
                let (bus, host) = host(&surface);
                let mounted = host.attach(PageFrame::new("journal"));

                bus.publish(Message::AppSynced(selecting("journal")));
                mounted.detach();
                mounted.detach();
                assert!(!mounted.is_attached());
                assert_eq!(bus.subscriber_count(Signal::AppSynced), 0);

                tokio::time::sleep(FADE * 2).await;
                assert!(surface.last_view("page-journal").is_none());

                bus.publish(Message::AppSynced(selecting("photos")));
                assert_eq!(surface.ops_for("page-journal").len(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_mounted_unsubscribes() {
        LocalSet::new()
            .run_until(async {
                let surface = Rc::new(RecordingSurface::new());
                let (bus, host) = host(&surface);
                drop(host.attach(PageFrame::new("journal")));
                assert_eq!(bus.subscriber_count(Signal::AppSynced), 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn attach_publishes_component_requests() {
        LocalSet::new()
            .run_until(async {
                let surface = Rc::new(RecordingSurface::new());
                let (bus, host) = host(&surface);
                let requests = Rc::new(Cell::new(0));
                let counter = Rc::clone(&requests);
                let _subscription = bus.subscribe(Signal::JournalNavigationRequested, move |_| {
                    counter.set(counter.get() + 1);
                    Ok(())
                });

                let mounted = host.attach(crate::ui::JournalNavigation::new());
                assert_eq!(requests.get(), 1);

                mounted.dispatch(&Interaction::click(crate::ui::components::NEXT_JOURNAL));
                assert_eq!(requests.get(), 1);
            })
            .await;
    }
}
