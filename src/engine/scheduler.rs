//! Cooperative scheduling and lifecycle for layout runs.
//!
//! A [`LayoutEngine`] owns at most one live simulation run. Steps execute one
//! per tick of an injected [`TickSource`] (the browser's animation frame in
//! production, a manual queue in tests), publish a snapshot to the
//! subscriber, and stop when the fixed iteration budget is exhausted.
//!
//! Every run carries a generation number. A scheduled step captures the
//! generation it belongs to and re-checks it against the engine before doing
//! anything, so a run superseded by `start` or `cancel` can never advance the
//! simulation or publish again — its one pending tick degrades to a no-op.

use std::cell::RefCell;
use std::rc::Rc;

use super::graph::{Bounds, Graph};
use super::simulation;
use super::view::LayoutFrame;

/// Steps executed per run. Fixed: small graphs keep stepping after they
/// visibly stop moving rather than exiting early on an energy threshold.
pub const ITERATION_BUDGET: u32 = 300;

/// Source of per-frame callbacks driving the simulation.
///
/// One `request_tick` schedules exactly one invocation of `tick`; the engine
/// re-requests after every live step. Injecting this instead of calling the
/// platform frame API directly lets tests drive the engine deterministically.
pub trait TickSource {
	fn request_tick(&self, tick: Box<dyn FnOnce()>);
}

/// Lifecycle of a layout run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
	/// No run in progress.
	Idle,
	/// Stepping under budget.
	Running,
	/// Budget exhausted; positions are final for this run.
	Settled,
}

struct EngineState {
	graph: Graph,
	bounds: Bounds,
	generation: u64,
	iteration: u32,
	phase: RunPhase,
	subscriber: Option<Rc<dyn Fn(&LayoutFrame)>>,
}

/// Drives the force simulation one step per tick and owns run lifecycle.
///
/// Cheap to clone; clones share the same underlying run. Single-threaded by
/// construction (`Rc`), matching the host's cooperative scheduling model.
#[derive(Clone)]
pub struct LayoutEngine {
	state: Rc<RefCell<EngineState>>,
	ticker: Rc<dyn TickSource>,
}

impl LayoutEngine {
	pub fn new(ticker: Rc<dyn TickSource>) -> Self {
		Self {
			state: Rc::new(RefCell::new(EngineState {
				graph: Graph::default(),
				bounds: Bounds::new(0.0, 0.0),
				generation: 0,
				iteration: 0,
				phase: RunPhase::Idle,
				subscriber: None,
			})),
			ticker,
		}
	}

	/// Register the publish callback, replacing any previous one. Invoked
	/// once per completed step with that step's snapshot; no engine borrow
	/// is held during the call, so the callback may call back into the
	/// engine (e.g. restart on new data).
	pub fn subscribe(&self, callback: impl Fn(&LayoutFrame) + 'static) {
		self.state.borrow_mut().subscriber = Some(Rc::new(callback));
	}

	/// Begin a fresh run, superseding any run in progress.
	pub fn start(&self, graph: Graph, bounds: Bounds) {
		let generation = {
			let mut state = self.state.borrow_mut();
			state.generation += 1;
			state.graph = graph;
			state.bounds = bounds;
			state.iteration = 0;
			state.phase = RunPhase::Running;
			state.generation
		};
		self.schedule(generation);
	}

	/// Stop the current run. Its pending tick, if any, becomes a no-op; no
	/// further steps execute or publish.
	pub fn cancel(&self) {
		let mut state = self.state.borrow_mut();
		state.generation += 1;
		state.phase = RunPhase::Idle;
	}

	/// True once the current run has exhausted its iteration budget.
	pub fn is_settled(&self) -> bool {
		self.state.borrow().phase == RunPhase::Settled
	}

	pub fn phase(&self) -> RunPhase {
		self.state.borrow().phase
	}

	fn schedule(&self, generation: u64) {
		let engine = self.clone();
		self.ticker
			.request_tick(Box::new(move || engine.step(generation)));
	}

	/// Execute one scheduled step, unless this tick's run was superseded.
	fn step(&self, generation: u64) {
		let frame = {
			let mut state = self.state.borrow_mut();
			if state.generation != generation || state.phase != RunPhase::Running {
				return;
			}
			let bounds = state.bounds;
			simulation::step(&mut state.graph, bounds);
			state.iteration += 1;
			if state.iteration >= ITERATION_BUDGET {
				state.phase = RunPhase::Settled;
			}
			LayoutFrame::capture(&state.graph, state.iteration, state.phase == RunPhase::Settled)
		};

		let subscriber = self.state.borrow().subscriber.clone();
		if let Some(publish) = subscriber {
			publish(&frame);
		}

		let still_running = {
			let state = self.state.borrow();
			state.generation == generation && state.phase == RunPhase::Running
		};
		if still_running {
			self.schedule(generation);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::VecDeque;

	use pretty_assertions::assert_eq;

	use super::super::document::Document;
	use super::super::graph::build_graph;
	use super::*;

	/// Deterministic stand-in for the animation frame: ticks queue up and
	/// run only when the test fires them.
	#[derive(Default)]
	struct ManualTicker {
		queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
	}

	impl TickSource for ManualTicker {
		fn request_tick(&self, tick: Box<dyn FnOnce()>) {
			self.queue.borrow_mut().push_back(tick);
		}
	}

	impl ManualTicker {
		fn fire(&self) -> bool {
			let next = self.queue.borrow_mut().pop_front();
			match next {
				Some(tick) => {
					tick();
					true
				}
				None => false,
			}
		}

		fn run_to_idle(&self) {
			while self.fire() {}
		}
	}

	fn doc(id: &str) -> Document {
		Document {
			id: id.into(),
			title: id.to_uppercase(),
			subjects: vec!["shared".into()],
			..Document::default()
		}
	}

	fn graph_of(ids: &[&str]) -> Graph {
		let documents: Vec<_> = ids.iter().map(|id| doc(id)).collect();
		build_graph(&documents, BOUNDS, 1)
	}

	const BOUNDS: Bounds = Bounds {
		width: 640.0,
		height: 480.0,
	};

	struct Harness {
		ticker: Rc<ManualTicker>,
		engine: LayoutEngine,
		frames: Rc<RefCell<Vec<LayoutFrame>>>,
	}

	fn harness() -> Harness {
		let ticker = Rc::new(ManualTicker::default());
		let engine = LayoutEngine::new(ticker.clone());
		let frames: Rc<RefCell<Vec<LayoutFrame>>> = Rc::new(RefCell::new(Vec::new()));
		let sink = frames.clone();
		engine.subscribe(move |frame| sink.borrow_mut().push(frame.clone()));
		Harness {
			ticker,
			engine,
			frames,
		}
	}

	#[test]
	fn uninterrupted_run_publishes_exactly_the_budget() {
		let h = harness();
		h.engine.start(graph_of(&["a"]), BOUNDS);
		h.ticker.run_to_idle();

		let frames = h.frames.borrow();
		assert_eq!(frames.len(), ITERATION_BUDGET as usize);
		assert!(frames.last().unwrap().settled);
		assert!(frames[..frames.len() - 1].iter().all(|f| !f.settled));
		assert_eq!(h.engine.phase(), RunPhase::Settled);
	}

	#[test]
	fn iterations_count_up_from_one() {
		let h = harness();
		h.engine.start(graph_of(&["a", "b"]), BOUNDS);
		for _ in 0..5 {
			h.ticker.fire();
		}
		let iterations: Vec<u32> = h.frames.borrow().iter().map(|f| f.iteration).collect();
		assert_eq!(iterations, [1, 2, 3, 4, 5]);
	}

	#[test]
	fn engine_starts_idle_and_requests_nothing() {
		let h = harness();
		assert_eq!(h.engine.phase(), RunPhase::Idle);
		assert!(!h.ticker.fire());
		assert!(h.frames.borrow().is_empty());
	}

	#[test]
	fn cancel_stops_stepping_and_publishing() {
		let h = harness();
		h.engine.start(graph_of(&["a"]), BOUNDS);
		for _ in 0..3 {
			h.ticker.fire();
		}
		h.engine.cancel();
		h.ticker.run_to_idle();

		assert_eq!(h.frames.borrow().len(), 3);
		assert_eq!(h.engine.phase(), RunPhase::Idle);
		assert!(!h.engine.is_settled());
	}

	#[test]
	fn superseding_run_silences_the_old_generation() {
		let h = harness();
		h.engine.start(graph_of(&["a"]), BOUNDS);
		for _ in 0..5 {
			h.ticker.fire();
		}
		h.engine.start(graph_of(&["b"]), BOUNDS);
		h.ticker.run_to_idle();

		let frames = h.frames.borrow();
		// 5 frames from the first run, a full budget from the second; the
		// first run's one pending tick no-opped.
		assert_eq!(frames.len(), 5 + ITERATION_BUDGET as usize);
		let first_b = frames
			.iter()
			.position(|f| f.nodes[0].id == "b")
			.expect("second run never published");
		assert!(frames[first_b..].iter().all(|f| f.nodes[0].id == "b"));
		assert_eq!(first_b, 5);
	}

	#[test]
	fn restart_resets_the_iteration_counter() {
		let h = harness();
		h.engine.start(graph_of(&["a"]), BOUNDS);
		for _ in 0..10 {
			h.ticker.fire();
		}
		h.engine.start(graph_of(&["a"]), Bounds::new(1024.0, 768.0));
		h.ticker.fire();
		// The stale pending tick no-ops; the next tick is the new run's
		// first step.
		h.ticker.fire();

		assert_eq!(h.frames.borrow().last().unwrap().iteration, 1);
	}

	#[test]
	fn settled_engine_requests_no_further_ticks() {
		let h = harness();
		h.engine.start(graph_of(&["a"]), BOUNDS);
		h.ticker.run_to_idle();
		assert!(h.engine.is_settled());

		assert!(!h.ticker.fire());
		assert_eq!(h.frames.borrow().len(), ITERATION_BUDGET as usize);
	}

	#[test]
	fn publishing_without_a_subscriber_is_harmless() {
		let ticker = Rc::new(ManualTicker::default());
		let engine = LayoutEngine::new(ticker.clone());
		engine.start(graph_of(&["a"]), BOUNDS);
		ticker.run_to_idle();
		assert!(engine.is_settled());
	}

	#[test]
	fn subscriber_may_restart_the_engine_reentrantly() {
		let ticker = Rc::new(ManualTicker::default());
		let engine = LayoutEngine::new(ticker.clone());
		let frames: Rc<RefCell<Vec<LayoutFrame>>> = Rc::new(RefCell::new(Vec::new()));

		let sink = frames.clone();
		let restarter = engine.clone();
		engine.subscribe(move |frame| {
			sink.borrow_mut().push(frame.clone());
			// Swap in a new document set the moment the first frame of the
			// first run lands, as a data-change handler would.
			if sink.borrow().len() == 1 {
				restarter.start(graph_of(&["b"]), BOUNDS);
			}
		});

		engine.start(graph_of(&["a"]), BOUNDS);
		ticker.run_to_idle();

		let frames = frames.borrow();
		assert_eq!(frames.len(), 1 + ITERATION_BUDGET as usize);
		assert!(frames[1..].iter().all(|f| f.nodes[0].id == "b"));
	}
}
