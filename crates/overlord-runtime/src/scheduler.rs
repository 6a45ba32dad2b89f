//! The cooperative process scheduler and request dispatch loop.
//!
//! One [`Scheduler`] owns the shared store, the pending request queue and
//! every scenario process. Scheduling is single-threaded and cooperative:
//! exactly one process runs at a time, until it hits a suspension point
//! (a [`Ctx::wait_for`] or an awaited host collaborator).
//!
//! # Dispatch Rounds
//!
//! ```text
//!        ┌──────────────────────────────────────────────┐
//!        │ 1. run every runnable process to quiescence   │◄──┐
//!        │    (processes emit → pending queue, register  │   │
//!        │     predicates, spawn siblings)               │   │
//!        ├──────────────────────────────────────────────┤   │
//!        │ 2. pop ONE pending request (FIFO)             │   │
//!        │    apply the reducer                          │   │
//!        │    mark every matching waiter runnable        │───┘
//!        └──────────────────────────────────────────────┘
//! ```
//!
//! The loop gives the two guarantees scenario scripts are written
//! against:
//!
//! - **In-order, exactly-once delivery.** A woken process reaches its
//!   next `wait_for` (re-registering its predicate) before the next
//!   request is dispatched, so a repeating listener observes every
//!   matching request in emission order.
//! - **Breadth-first cascades.** Requests emitted while handling a wake
//!   are queued behind the current round, so two processes reacting to
//!   the same request never observe each other's cascaded side effects
//!   within that round. Scripts that order their own emits (set a flag,
//!   *then* emit the request whose listeners read the flag) can rely on
//!   FIFO application — this ordering is a documented dependency, not an
//!   accident.
//!
//! A consequence scripts must respect: state read immediately after an
//! own `emit` does **not** see that emit applied. Requests that need
//! "the most recently deployed instance" style resolution carry the id
//! and let the reducer resolve at apply time.
//!
//! # Failure Isolation
//!
//! A process that resolves to `Err` is logged with its name and error
//! code and dropped; every other process keeps running. See
//! [`ProcessError`].

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;
use futures::task::ArcWake;
use futures::FutureExt;
use overlord_event::{Matcher, Request};
use overlord_types::{ErrorCode, GroupId};
use tracing::{debug, debug_span, error};

use crate::error::{HostError, ProcessError};
use crate::host::{Choice, EventCard, HostServices};
use crate::store::Reduce;

/// Identifier for a spawned process.
///
/// Only useful for logging and debugging — there is no external
/// cancellation, so nothing can be done *to* a process from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcessId(u64);

struct ProcessSlot {
    name: String,
    future: LocalBoxFuture<'static, Result<(), ProcessError>>,
}

struct Waiter {
    pid: ProcessId,
    matcher: Matcher,
    slot: Rc<RefCell<Option<Request>>>,
}

struct Core<S> {
    state: S,
    pending: VecDeque<Request>,
    waiters: Vec<Waiter>,
    runnable: VecDeque<ProcessId>,
    processes: HashMap<ProcessId, ProcessSlot>,
    /// Process currently being polled; `wait_for` registers against it.
    current: Option<ProcessId>,
    next_pid: u64,
}

impl<S> Core<S> {
    fn spawn(
        &mut self,
        name: impl Into<String>,
        future: LocalBoxFuture<'static, Result<(), ProcessError>>,
    ) -> ProcessId {
        let pid = ProcessId(self.next_pid);
        self.next_pid += 1;
        let name = name.into();
        debug!(process = %name, ?pid, "process spawned");
        self.processes.insert(pid, ProcessSlot { name, future });
        self.runnable.push_back(pid);
        pid
    }
}

/// Wake queue fed by host collaborator futures, possibly off-thread.
type ExternalWakes = Mutex<Vec<ProcessId>>;

struct PidWaker {
    pid: ProcessId,
    wakes: Arc<ExternalWakes>,
}

impl ArcWake for PidWaker {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self
            .wakes
            .lock()
            .expect("wake queue poisoned")
            .push(arc_self.pid);
    }
}

/// The scenario runtime: shared store, request queue and process table.
///
/// Hosts construct one per mission, spawn the scenario's entry process,
/// then alternate between emitting game events and calling
/// [`run_until_idle`](Self::run_until_idle).
///
/// # Example
///
/// ```
/// use overlord_event::{Matcher, Request};
/// use overlord_runtime::testing::TestHost;
/// use overlord_runtime::{Reduce, Scheduler};
///
/// #[derive(Default)]
/// struct Counter {
///     pings: u32,
/// }
///
/// impl Reduce for Counter {
///     fn apply(&mut self, req: &Request) {
///         if req.is("PING") {
///             self.pings += 1;
///         }
///     }
/// }
///
/// let host = TestHost::new();
/// let mut scheduler = Scheduler::new(Counter::default(), host.services());
///
/// let ctx = scheduler.ctx();
/// scheduler.spawn("echo", async move {
///     loop {
///         ctx.wait_for(Matcher::kind("PING")).await;
///         ctx.emit(Request::new("PONG"));
///     }
/// });
///
/// scheduler.dispatch(Request::new("PING"));
/// assert_eq!(scheduler.with_state(|s| s.pings), 1);
/// ```
pub struct Scheduler<S> {
    core: Rc<RefCell<Core<S>>>,
    services: Rc<HostServices>,
    external: Arc<ExternalWakes>,
}

impl<S: Reduce + 'static> Scheduler<S> {
    /// Creates a scheduler owning `state`, wired to the host's
    /// collaborators.
    #[must_use]
    pub fn new(state: S, services: HostServices) -> Self {
        Self {
            core: Rc::new(RefCell::new(Core {
                state,
                pending: VecDeque::new(),
                waiters: Vec::new(),
                runnable: VecDeque::new(),
                processes: HashMap::new(),
                current: None,
                next_pid: 0,
            })),
            services: Rc::new(services),
            external: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a context handle for building process futures.
    #[must_use]
    pub fn ctx(&self) -> Ctx<S> {
        Ctx {
            core: Rc::clone(&self.core),
            services: Rc::clone(&self.services),
        }
    }

    /// Schedules a new process. It first runs on the next
    /// [`run_until_idle`](Self::run_until_idle).
    pub fn spawn<F>(&self, name: impl Into<String>, future: F) -> ProcessId
    where
        F: Future<Output = Result<(), ProcessError>> + 'static,
    {
        self.core.borrow_mut().spawn(name, future.boxed_local())
    }

    /// Appends a request to the pending queue without running anything.
    pub fn emit(&self, req: Request) {
        self.core.borrow_mut().pending.push_back(req);
    }

    /// Emits a request and runs until idle — the host's main entry point.
    pub fn dispatch(&mut self, req: Request) {
        self.emit(req);
        self.run_until_idle();
    }

    /// Reads the shared store through a selector closure.
    pub fn with_state<R>(&self, select: impl FnOnce(&S) -> R) -> R {
        select(&self.core.borrow().state)
    }

    /// Returns the number of live (running or parked) processes.
    #[must_use]
    pub fn process_count(&self) -> usize {
        self.core.borrow().processes.len()
    }

    /// Runs dispatch rounds until no process is runnable and no request
    /// is pending. Processes parked on predicates or host collaborators
    /// remain parked; call again after the next emit or host answer.
    pub fn run_until_idle(&mut self) {
        loop {
            self.drain_external_wakes();
            if let Some(pid) = self.pop_runnable() {
                self.poll_process(pid);
                continue;
            }
            let next = self.core.borrow_mut().pending.pop_front();
            match next {
                Some(req) => self.deliver(&req),
                None => {
                    let woken = !self.external.lock().expect("wake queue poisoned").is_empty();
                    if !woken {
                        break;
                    }
                }
            }
        }
    }

    fn drain_external_wakes(&self) {
        let woken: Vec<ProcessId> = {
            let mut queue = self.external.lock().expect("wake queue poisoned");
            queue.drain(..).collect()
        };
        if !woken.is_empty() {
            let mut core = self.core.borrow_mut();
            core.runnable.extend(woken);
        }
    }

    fn pop_runnable(&self) -> Option<ProcessId> {
        let mut core = self.core.borrow_mut();
        while let Some(pid) = core.runnable.pop_front() {
            // Stale wakes for finished processes are dropped here.
            if core.processes.contains_key(&pid) {
                return Some(pid);
            }
        }
        None
    }

    /// Applies one request to the store, then marks every waiting process
    /// whose predicate matches as runnable. The matching set is fixed
    /// before any of them runs.
    fn deliver(&self, req: &Request) {
        debug!(kind = %req.kind, "dispatching request");
        let mut core = self.core.borrow_mut();
        core.state.apply(req);

        let mut matched = Vec::new();
        core.waiters.retain(|w| {
            if w.matcher.matches(req) {
                matched.push((w.pid, Rc::clone(&w.slot)));
                false
            } else {
                true
            }
        });
        for (pid, slot) in matched {
            *slot.borrow_mut() = Some(req.clone());
            core.runnable.push_back(pid);
        }
    }

    /// Polls one process to its next suspension point.
    ///
    /// The slot is taken out of the table for the duration of the poll so
    /// the process may re-borrow the core through its `Ctx`.
    fn poll_process(&self, pid: ProcessId) {
        let slot = self.core.borrow_mut().processes.remove(&pid);
        let Some(mut slot) = slot else { return };

        self.core.borrow_mut().current = Some(pid);
        let waker = futures::task::waker(Arc::new(PidWaker {
            pid,
            wakes: Arc::clone(&self.external),
        }));
        let mut task_cx = Context::from_waker(&waker);
        let span = debug_span!("process", name = %slot.name);
        let poll = {
            let _guard = span.enter();
            slot.future.as_mut().poll(&mut task_cx)
        };
        self.core.borrow_mut().current = None;

        match poll {
            Poll::Ready(Ok(())) => debug!(process = %slot.name, "process finished"),
            Poll::Ready(Err(e)) => {
                // Isolation: only this process dies.
                error!(process = %slot.name, code = e.code(), "process terminated: {e}");
            }
            Poll::Pending => {
                let _ = self.core.borrow_mut().processes.insert(pid, slot);
            }
        }
    }
}

/// Handle a process uses to interact with the runtime.
///
/// Cheap to clone; every spawned future captures one. All durable state
/// lives in the shared store — the context carries no identity of its
/// own, so one clone can be handed to any number of child processes.
pub struct Ctx<S> {
    core: Rc<RefCell<Core<S>>>,
    services: Rc<HostServices>,
}

impl<S> Clone for Ctx<S> {
    fn clone(&self) -> Self {
        Self {
            core: Rc::clone(&self.core),
            services: Rc::clone(&self.services),
        }
    }
}

impl<S: Reduce + 'static> Ctx<S> {
    /// Submits a request. Never suspends; the mutation and any wake-ups
    /// happen in a later dispatch round (never inside this call).
    pub fn emit(&self, req: Request) {
        self.core.borrow_mut().pending.push_back(req);
    }

    /// Suspends until a request matching `matcher` is dispatched and
    /// resumes with that request.
    ///
    /// Each call observes exactly one request; loop to keep listening.
    /// Requests dispatched while the process is running (not parked
    /// here) are not replayed.
    #[must_use]
    pub fn wait_for(&self, matcher: Matcher) -> WaitFor<S> {
        WaitFor {
            core: Rc::clone(&self.core),
            matcher: Some(matcher),
            slot: Rc::new(RefCell::new(None)),
            registered: false,
        }
    }

    /// Synchronous snapshot read of the shared store.
    pub fn read<R>(&self, select: impl FnOnce(&S) -> R) -> R {
        select(&self.core.borrow().state)
    }

    /// Schedules an independent process; the caller does not await it and
    /// never sees its result.
    pub fn spawn<F>(&self, name: impl Into<String>, future: F) -> ProcessId
    where
        F: Future<Output = Result<(), ProcessError>> + 'static,
    {
        self.core.borrow_mut().spawn(name, future.boxed_local())
    }

    /// Fire-and-forget a whole batch of processes; returns once all are
    /// started (not finished).
    pub fn spawn_all(
        &self,
        processes: Vec<(&'static str, LocalBoxFuture<'static, Result<(), ProcessError>>)>,
    ) {
        let mut core = self.core.borrow_mut();
        for (name, future) in processes {
            let _ = core.spawn(name, future);
        }
    }

    /// Asks the host's choice dialog; suspends until the user answers.
    pub async fn ask_choice(&self, prompt: &str, topic: &str) -> Result<Choice, HostError> {
        let services = Rc::clone(&self.services);
        services.decisions.ask_choice(prompt, topic).await
    }

    /// Shows an event card; suspends until acknowledged.
    pub async fn show_event(&self, card: EventCard) -> Result<(), HostError> {
        let services = Rc::clone(&self.services);
        services.display.show_event(&card).await
    }

    /// Shows a group's AI card; suspends until acknowledged.
    pub async fn show_group(&self, group: &GroupId) -> Result<(), HostError> {
        let services = Rc::clone(&self.services);
        services.display.show_group(group).await
    }

    /// Records a telemetry event. Never suspends.
    pub fn track(&self, category: &str, action: &str, label: Option<&str>) {
        self.services.telemetry.record(category, action, label);
    }

    /// Picks uniformly among the candidates.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty.
    pub fn pick<'a>(&self, candidates: &[&'a str]) -> &'a str {
        assert!(!candidates.is_empty(), "pick requires at least one candidate");
        candidates[self.services.dice.pick_index(candidates.len())]
    }
}

/// Future returned by [`Ctx::wait_for`].
pub struct WaitFor<S> {
    core: Rc<RefCell<Core<S>>>,
    matcher: Option<Matcher>,
    slot: Rc<RefCell<Option<Request>>>,
    registered: bool,
}

impl<S> Future for WaitFor<S> {
    type Output = Request;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Request> {
        let this = self.get_mut();
        if let Some(req) = this.slot.borrow_mut().take() {
            return Poll::Ready(req);
        }
        if !this.registered {
            this.registered = true;
            let mut core = this.core.borrow_mut();
            let pid = core
                .current
                .expect("wait_for polled outside a scheduled process");
            let matcher = this.matcher.take().expect("matcher consumed once");
            core.waiters.push(Waiter {
                pid,
                matcher,
                slot: Rc::clone(&this.slot),
            });
        }
        Poll::Pending
    }
}

impl<S> Drop for WaitFor<S> {
    fn drop(&mut self) {
        // Deregister if still parked so an abandoned wait cannot leak a
        // waiter entry.
        if self.registered && self.slot.borrow().is_none() {
            if let Ok(mut core) = self.core.try_borrow_mut() {
                core.waiters.retain(|w| !Rc::ptr_eq(&w.slot, &self.slot));
            }
        }
    }
}
