//! SVG DOM construction and the per-tick attribute sync.
//!
//! The scaffold (defs, lines, node groups) is built once at mount; every
//! animation frame runs one simulation tick and then rewrites only the
//! geometry attributes, strictly in that order.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use forcemap::config::RenderConfig;
use forcemap::error::{RenderError, RenderResult};
use forcemap::graph::{GraphData, ResolvedLink};
use forcemap::scene::{self, NodeFill, NodeVisual, fmt_coord};
use forcemap::simulation::{CpuSimulation, ForceLayout};

use crate::pointer::{self, DragState};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Tile placement of the pattern image
const PATTERN_IMAGE_X: f32 = -8.0;
const PATTERN_IMAGE_Y: f32 = -25.0;
const PATTERN_IMAGE_SIZE: f32 = 100.0;

struct GraphView {
    svg: Element,
    link_els: Vec<Element>,
    node_els: Vec<Element>,
    links: Vec<ResolvedLink>,
    visuals: Vec<NodeVisual>,
    sim: CpuSimulation,
    drag: DragState,
}

impl GraphView {
    /// Rewrite the geometry attributes from the current positions.
    ///
    /// Pure function of positions; identical positions produce identical
    /// attribute values.
    fn sync(&self) {
        let nodes = self.sim.nodes();

        for (el, link) in self.link_els.iter().zip(&self.links) {
            let geometry = scene::link_geometry(link, nodes);
            let _ = el.set_attribute("x1", &fmt_coord(geometry.x1));
            let _ = el.set_attribute("y1", &fmt_coord(geometry.y1));
            let _ = el.set_attribute("x2", &fmt_coord(geometry.x2));
            let _ = el.set_attribute("y2", &fmt_coord(geometry.y2));
        }

        for (el, node) in self.node_els.iter().zip(nodes) {
            let _ = el.set_attribute("transform", &scene::node_transform(node));
        }
    }

    /// Pointer position in SVG-local coordinates
    fn event_position(&self, ev: &MouseEvent) -> (f32, f32) {
        let rect = self.svg.get_bounding_client_rect();
        (
            (ev.client_x() as f64 - rect.left()) as f32,
            (ev.client_y() as f64 - rect.top()) as f32,
        )
    }
}

pub(crate) fn mount_impl(
    selector: &str,
    graph_json: &str,
    config_json: Option<&str>,
) -> RenderResult<()> {
    let config: RenderConfig = match config_json {
        Some(json) => serde_json::from_str(json).map_err(|e| RenderError::Parse(e.to_string()))?,
        None => RenderConfig::default(),
    };
    let graph: GraphData =
        serde_json::from_str(graph_json).map_err(|e| RenderError::Parse(e.to_string()))?;

    // validation happens before any DOM mutation; no partial render
    let links = graph.resolve()?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::Mount(selector.to_string()))?;
    let container = document
        .query_selector(selector)
        .map_err(dom_err)?
        .ok_or_else(|| RenderError::Mount(selector.to_string()))?;

    let visuals = scene::node_visuals(&graph.nodes);

    let svg = build_svg(&document, &config)?;
    let link_els = build_links(&document, &svg, &links)?;
    let node_els = build_nodes(&document, &svg, &visuals)?;
    container.append_child(&svg).map_err(dom_err)?;

    let sim = CpuSimulation::new(graph.nodes.len(), links.clone(), &config);

    let view = Rc::new(RefCell::new(GraphView {
        svg,
        link_els,
        node_els,
        links,
        visuals,
        sim,
        drag: DragState::default(),
    }));

    view.borrow().sync();
    attach_pointer_handlers(&view)?;
    start_animation(&view);
    Ok(())
}

fn dom_err(err: JsValue) -> RenderError {
    RenderError::Write(format!("{err:?}"))
}

fn create(document: &Document, name: &str) -> RenderResult<Element> {
    document
        .create_element_ns(Some(SVG_NS), name)
        .map_err(dom_err)
}

fn set(el: &Element, name: &str, value: &str) -> RenderResult<()> {
    el.set_attribute(name, value).map_err(dom_err)
}

/// Build the svg root with the arrowhead marker and path-node pattern defs
fn build_svg(document: &Document, config: &RenderConfig) -> RenderResult<Element> {
    let svg = create(document, "svg")?;
    set(&svg, "width", &fmt_coord(config.width))?;
    set(&svg, "height", &fmt_coord(config.height))?;

    let defs = create(document, "defs")?;

    let marker = create(document, "marker")?;
    set(&marker, "id", "arrow")?;
    set(&marker, "viewBox", &config.arrowhead.view_box)?;
    set(&marker, "refX", &fmt_coord(config.arrowhead.ref_x))?;
    set(&marker, "markerWidth", &fmt_coord(config.arrowhead.width))?;
    set(&marker, "markerHeight", &fmt_coord(config.arrowhead.height))?;
    set(&marker, "orient", "auto")?;
    let tip = create(document, "path")?;
    set(&tip, "d", &config.arrowhead.path)?;
    marker.append_child(&tip).map_err(dom_err)?;
    defs.append_child(&marker).map_err(dom_err)?;

    let pattern = create(document, "pattern")?;
    set(&pattern, "id", "path-pattern")?;
    set(&pattern, "width", "1")?;
    set(&pattern, "height", "1")?;
    set(&pattern, "x", "0")?;
    set(&pattern, "y", "0")?;
    let image = create(document, "image")?;
    set(&image, "x", &fmt_coord(PATTERN_IMAGE_X))?;
    set(&image, "y", &fmt_coord(PATTERN_IMAGE_Y))?;
    set(&image, "width", &fmt_coord(PATTERN_IMAGE_SIZE))?;
    set(&image, "height", &fmt_coord(PATTERN_IMAGE_SIZE))?;
    image
        .set_attribute_ns(Some(XLINK_NS), "xlink:href", &config.pattern_href)
        .map_err(dom_err)?;
    pattern.append_child(&image).map_err(dom_err)?;
    defs.append_child(&pattern).map_err(dom_err)?;

    svg.append_child(&defs).map_err(dom_err)?;
    Ok(svg)
}

/// One line per link, with its static stroke, opacity, and arrowhead
fn build_links(
    document: &Document,
    svg: &Element,
    links: &[ResolvedLink],
) -> RenderResult<Vec<Element>> {
    links
        .iter()
        .map(|link| {
            let line = create(document, "line")?;
            set(&line, "class", "link")?;
            if let Some(stroke) = scene::link_stroke(link.value) {
                set(&line, "stroke", stroke)?;
            }
            set(&line, "opacity", &fmt_coord(scene::LINK_OPACITY))?;
            set(&line, "marker-end", "url(#arrow)")?;
            svg.append_child(&line).map_err(dom_err)?;
            Ok(line)
        })
        .collect()
}

/// One group per node: circle with its static radius and fill, plus the
/// hover title
fn build_nodes(
    document: &Document,
    svg: &Element,
    visuals: &[NodeVisual],
) -> RenderResult<Vec<Element>> {
    visuals
        .iter()
        .map(|visual| {
            let group = create(document, "g")?;
            set(&group, "class", "node")?;

            let circle = create(document, "circle")?;
            set(&circle, "r", &fmt_coord(visual.radius))?;
            match visual.fill {
                NodeFill::Pattern => set(&circle, "fill", "url(#path-pattern)")?,
                NodeFill::Color(color) => set(&circle, "fill", color)?,
            }
            group.append_child(&circle).map_err(dom_err)?;

            let title = create(document, "title")?;
            title.set_text_content(Some(&visual.tooltip));
            group.append_child(&title).map_err(dom_err)?;

            svg.append_child(&group).map_err(dom_err)?;
            Ok(group)
        })
        .collect()
}

/// Wire up drag interaction.
///
/// A drag pins the node at the pointer, suppressing simulation movement and
/// clamping for that node; release unpins it and reheats the layout.
fn attach_pointer_handlers(view: &Rc<RefCell<GraphView>>) -> RenderResult<()> {
    let svg = view.borrow().svg.clone();

    let v = view.clone();
    let on_mousedown = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let mut view = v.borrow_mut();
        let (x, y) = view.event_position(&ev);
        let radii: Vec<f32> = view.visuals.iter().map(|vis| vis.radius).collect();
        if let Some(index) = pointer::hit_test(view.sim.nodes(), &radii, x, y) {
            view.drag.begin(index);
            view.sim.pin(index, x, y);
        }
    });
    svg.add_event_listener_with_callback("mousedown", on_mousedown.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_mousedown.forget();

    let v = view.clone();
    let on_mousemove = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        let mut view = v.borrow_mut();
        if let Some(index) = view.drag.node() {
            let (x, y) = view.event_position(&ev);
            view.sim.pin(index, x, y);
            view.sync();
        }
    });
    svg.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_mousemove.forget();

    let v = view.clone();
    let on_release = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| {
        let mut view = v.borrow_mut();
        if let Some(index) = view.drag.end() {
            view.sim.unpin(index);
            view.sim.reheat();
        }
    });
    svg.add_event_listener_with_callback("mouseup", on_release.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    svg.add_event_listener_with_callback("mouseleave", on_release.as_ref().unchecked_ref())
        .map_err(dom_err)?;
    on_release.forget();

    Ok(())
}

/// Drive the simulation from the animation-frame loop: one tick, then the
/// attribute sync, every frame
fn start_animation(view: &Rc<RefCell<GraphView>>) {
    let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let inner = animate.clone();
    let v = view.clone();

    *animate.borrow_mut() = Some(Closure::new(move || {
        {
            let mut view = v.borrow_mut();
            view.sim.tick();
            view.sync();
        }
        if let Some(cb) = inner.borrow().as_ref() {
            if let Some(window) = web_sys::window() {
                let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }));

    if let Some(cb) = animate.borrow().as_ref() {
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
