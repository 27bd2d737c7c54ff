use leptos::html::Canvas;
use leptos::prelude::*;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use crate::graph::style::type_fill;
use crate::graph::{
	Entity, EntityType, GraphInput, GraphScene, LayoutConfig, PointerButton, ViewportConfig,
	ZoomDirection,
};

/// Map a pointer event from client pixels to logical canvas units.
fn canvas_point(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent, size: (f64, f64)) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	if rect.width() <= 0.0 || rect.height() <= 0.0 {
		return None;
	}
	Some((
		(ev.client_x() as f64 - rect.left()) * size.0 / rect.width(),
		(ev.client_y() as f64 - rect.top()) * size.1 / rect.height(),
	))
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

#[component]
pub fn EntityGraphCanvas(
	#[prop(into)] data: Signal<GraphInput>,
	#[prop(into)] is_building: Signal<bool>,
	#[prop(into)] on_build_graph: Callback<()>,
	#[prop(optional, into)] on_entity_click: Option<Callback<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let viewport_config = ViewportConfig::default();
	let size = (viewport_config.canvas_width, viewport_config.canvas_height);
	let zoom_step = viewport_config.zoom_step;
	let (canvas_width, canvas_height) = (size.0.to_string(), size.1.to_string());
	let scene = RwSignal::new(GraphScene::new(
		LayoutConfig::default(),
		viewport_config,
		StdRng::seed_from_u64(random_seed()),
	));

	let notify_click = move |selected: Option<String>| {
		if let (Some(id), Some(cb)) = (selected, on_entity_click) {
			cb.run(id);
		}
	};

	Effect::new(move |_| {
		let input = data.get();
		info!(
			"graph input: {} entities, {} relations",
			input.entities.len(),
			input.relations.len()
		);
		scene.update(|s| s.set_graph(input));
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let frame = scene.with(|s| s.frame());
		if let Err(err) = render::draw(&canvas, &frame) {
			error!("failed to draw graph: {err}");
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev, size) else {
			return;
		};
		scene.update(|s| s.pointer_down(x, y, PointerButton::from(ev.button())));
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev, size) else {
			return;
		};
		scene.maybe_update(|s| s.pointer_move(x, y));
	};

	let on_mouseup = move |_: MouseEvent| {
		notify_click(scene.try_update(|s| s.pointer_up()).flatten());
	};

	let on_mouseleave = move |_: MouseEvent| {
		scene.update(|s| s.pointer_leave());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref, &ev, size) else {
			return;
		};
		let direction = ZoomDirection::from_wheel_delta(ev.delta_y());
		scene.update(|s| s.viewport_mut().wheel_zoom(x, y, direction));
	};

	let filter_chips = EntityType::ALL
		.into_iter()
		.map(|kind| {
			let count = move || {
				scene.with(|s| {
					s.type_counts()
						.into_iter()
						.find(|(k, _)| *k == kind)
						.map_or(0, |(_, n)| n)
				})
			};
			view! {
				<button
					class="filter-chip"
					class:inactive=move || !scene.with(|s| s.filter().is_active(kind))
					style:border-color=type_fill(kind)
					on:click=move |_| scene.update(|s| {
						s.toggle_filter(kind);
					})
				>
					{kind.label()}
					" "
					<span class="filter-count">{count}</span>
				</button>
			}
		})
		.collect_view();

	let detail_panel = move || {
		let details = scene.with(|s| {
			s.selected_details().map(|d| {
				let neighbors: Vec<Entity> = d.neighbors.into_iter().cloned().collect();
				(d.entity.entity.clone(), neighbors)
			})
		});
		details.map(|(entity, neighbors)| {
			let focus_id = entity.id.clone();
			view! {
				<aside class="detail-panel">
					<header>
						<h2>{entity.name.clone()}</h2>
						<button
							class="detail-close"
							on:click=move |_| scene.update(|s| s.clear_selection())
						>
							"×"
						</button>
					</header>
					<p class="detail-type" style:color=type_fill(entity.kind)>
						{entity.kind.label()}
					</p>
					<p class="detail-stats">
						{format!(
							"{} mentions across {} articles",
							entity.mention_count,
							entity.article_ids.len(),
						)}
					</p>
					<button
						class="detail-focus"
						on:click=move |_| scene.update(|s| {
							s.zoom_to_entity(&focus_id);
						})
					>
						"Focus"
					</button>
					<h3>{format!("Connected ({})", neighbors.len())}</h3>
					<ul class="detail-neighbors">
						{neighbors
							.into_iter()
							.map(|n| {
								let id = n.id.clone();
								view! {
									<li>
										<button
											style:color=type_fill(n.kind)
											on:click=move |_| {
												let focused = scene
													.try_update(|s| s.focus_entity(&id))
													.unwrap_or(false);
												if focused {
													notify_click(Some(id.clone()));
												}
											}
										>
											{n.name.clone()}
										</button>
									</li>
								}
							})
							.collect_view()}
					</ul>
				</aside>
			}
		})
	};

	let empty_state = move || {
		scene.with(|s| s.entities().is_empty()).then(|| {
			view! {
				<div class="graph-empty">
					"No entities yet. Build the graph to extract people, organizations and topics."
				</div>
			}
		})
	};

	view! {
		<div class="entity-graph">
			<div class="graph-toolbar">
				<button on:click=move |_| scene.update(|s| s.viewport_mut().zoom(zoom_step, None))>
					"+"
				</button>
				<span class="zoom-readout">
					{move || format!("{}%", scene.with(|s| s.viewport().zoom_percent()))}
				</span>
				<button on:click=move |_| scene.update(|s| s.viewport_mut().zoom(-zoom_step, None))>
					"−"
				</button>
				<button on:click=move |_| scene.update(|s| s.viewport_mut().reset())>"Reset"</button>
				<button on:click=move |_| scene.update(|s| s.zoom_to_fit())>"Fit"</button>
				<button on:click=move |_| scene.update(|s| s.rebuild_layout())>"Re-layout"</button>
				<button
					class="build-graph"
					disabled=move || is_building.get()
					on:click=move |_| on_build_graph.run(())
				>
					{move || if is_building.get() { "Building…" } else { "Build graph" }}
				</button>
			</div>
			<div class="graph-filters">{filter_chips}</div>
			<div class="graph-stage">
				<canvas
					node_ref=canvas_ref
					class="entity-graph-canvas"
					width=canvas_width
					height=canvas_height
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style="display: block; width: 100%; height: auto; cursor: grab;"
				/>
				{empty_state}
				{detail_panel}
			</div>
		</div>
	}
}
