use leptos::prelude::*;
use log::{debug, error, info};

use crate::components::entity_graph::EntityGraphCanvas;
use crate::error::GraphError;
use crate::graph::GraphInput;

/// Extraction output bundled for the demo page.
const SAMPLE_GRAPH: &str = include_str!("sample_graph.json");

fn load_sample() -> Result<GraphInput, GraphError> {
	let input = GraphInput::from_json(SAMPLE_GRAPH)?;
	info!(
		"loaded sample graph: {} entities, {} relations",
		input.entities.len(),
		input.relations.len()
	);
	Ok(input)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = RwSignal::new(GraphInput::default());
	let is_building = RwSignal::new(false);
	let build_error = RwSignal::new(None::<String>);
	let last_clicked = RwSignal::new(None::<String>);

	let on_build_graph = Callback::new(move |_: ()| {
		is_building.set(true);
		match load_sample() {
			Ok(input) => {
				build_error.set(None);
				graph.set(input);
			}
			Err(err) => {
				error!("graph build failed: {err}");
				build_error.set(Some(err.to_string()));
			}
		}
		is_building.set(false);
	});

	let on_entity_click = Callback::new(move |id: String| {
		debug!("entity selected: {id}");
		last_clicked.set(Some(id));
	});

	view! {
		<div class="fullscreen-graph">
			<EntityGraphCanvas
				data=graph
				is_building=is_building
				on_build_graph=on_build_graph
				on_entity_click=on_entity_click
			/>
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">
					"Click a node to inspect it. Scroll to zoom. Drag the background to pan."
				</p>
				{move || build_error.get().map(|msg| view! { <p class="graph-error">{msg}</p> })}
				{move || {
					last_clicked
						.get()
						.map(|id| view! { <p class="last-selected">"Last selected: " {id}</p> })
				}}
			</div>
		</div>
	}
}
