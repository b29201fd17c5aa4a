use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::paint;
use super::readiness::Readiness;
use super::registry::NodeRegistry;
use super::scene::Scene;
use super::state::DiagramState;
use super::theme::{CanvasOptions, DiagramTheme};
use super::types::Graph;

const FALLBACK_WIDTH: f64 = 800.0;
const FRAME_DT: f64 = 0.016;

type Slot<T> = Rc<RefCell<Option<T>>>;
type SharedState = Slot<DiagramState>;
type FrameCallback = Slot<Closure<dyn FnMut()>>;

/// Empties a torn-down diagram's state and hands back the frame callback,
/// whose captures include the callback's own slot.
fn release<S, C>(state: &Slot<S>, frame: &Slot<C>) -> Option<C> {
	state.borrow_mut().take();
	frame.borrow_mut().take()
}

/// Flips the interaction lock; `None` until the diagram is initialised.
fn toggle_lock(state: &SharedState) -> Option<bool> {
	let mut state = state.borrow_mut();
	let s = state.as_mut()?;
	s.set_interactive(!s.interactive);
	Some(!s.interactive)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn parent_width(canvas: &HtmlCanvasElement) -> f64 {
	canvas
		.parent_element()
		.map(|p| p.client_width() as f64)
		.filter(|w| *w > 0.0)
		.unwrap_or(FALLBACK_WIDTH)
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive, read-only surface for one diagram.
#[component]
pub fn DiagramCanvas(
	graph: Graph,
	#[prop(optional)] registry: NodeRegistry,
	#[prop(optional)] options: CanvasOptions,
	#[prop(optional)] theme: DiagramTheme,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let mounted = Arc::new(AtomicBool::new(true));

	let (height, show_controls) = (options.height_px, options.show_controls);
	let (state_init, animate_init, resize_cb_init, mounted_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), mounted.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("diagram canvas mounted without a window");
			return;
		};

		let width = parent_width(&canvas);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = context_2d(&canvas) else {
			warn!("2d canvas context unavailable, diagram left blank");
			return;
		};
		let measure = paint::CanvasMeasure { ctx: &ctx, theme: &theme };
		let scene = Scene::build_with(&graph, &registry, &theme, &options.edge, &measure);
		info!(
			"diagram mounted: {} nodes, {} edges, {}x{}",
			scene.nodes.len(),
			scene.edges.len(),
			width,
			height
		);
		*state_init.borrow_mut() = Some(DiagramState::new(scene, width, height, &options));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let nw = parent_width(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, height);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner, resize_inner, mounted_anim) = (
			state_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
			mounted_init.clone(),
		);
		let theme = theme.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if !mounted_anim.load(Ordering::Relaxed) {
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				// still running inside the frame callback: drop it on the next task
				if let Some(cb) = release(&state_anim, &animate_inner) {
					let drop_later = Closure::once_into_js(move || drop(cb));
					let _ = win.set_timeout_with_callback(drop_later.unchecked_ref());
				}
				debug!("diagram unmounted, frame loop released");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(FRAME_DT);
				if s.take_dirty() {
					paint::render(s, &theme, &ctx);
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let mounted_cleanup = mounted.clone();
	on_cleanup(move || mounted_cleanup.store(false, Ordering::Relaxed));

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_pan(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pan_to(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_pan();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			if s.interactive {
				ev.prevent_default();
				s.wheel(ev.delta_y(), x, y);
			}
		}
	};

	let controls = show_controls.then(|| view! { <ZoomControls state=state.clone() /> });

	view! {
		<div
			class="diagram-canvas"
			style=format!("position: relative; width: 100%; height: {height}px;")
		>
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			{controls}
		</div>
	}
}

/// Zoom in, zoom out, fit view and interaction lock.
#[component]
fn ZoomControls(state: SharedState) -> impl IntoView {
	let (locked, set_locked) = signal(false);
	let with_state = {
		let state = state.clone();
		move |f: fn(&mut DiagramState)| {
			let state = state.clone();
			move |_: MouseEvent| {
				if let Some(ref mut s) = *state.borrow_mut() {
					f(s);
				}
			}
		}
	};
	let on_lock = move |_: MouseEvent| {
		if let Some(now_locked) = toggle_lock(&state) {
			set_locked.set(now_locked);
		}
	};

	view! {
		<div
			class="diagram-controls"
			style="position: absolute; left: 10px; bottom: 10px; display: flex; flex-direction: column; box-shadow: 0 0 2px 1px rgba(0, 0, 0, 0.08);"
		>
			<button title="zoom in" on:click=with_state(DiagramState::zoom_in)>"+"</button>
			<button title="zoom out" on:click=with_state(DiagramState::zoom_out)>"−"</button>
			<button title="fit view" on:click=with_state(DiagramState::fit_view)>"⤢"</button>
			<button
				title="toggle interactivity"
				on:click=on_lock
			>
				{move || if locked.get() { "🔒" } else { "🔓" }}
			</button>
		</div>
	}
}

/// Renders `children` only once running in a live client context.
#[component]
pub fn ClientOnly(children: ChildrenFn) -> impl IntoView {
	let (readiness, set_readiness) = signal(Readiness::Pending);
	Effect::new(move |_| {
		set_readiness.update(|r| {
			if r.mark_ready() {
				debug!("client context ready");
			}
		});
	});
	move || readiness.get().is_ready().then(|| children())
}
