//! Browser bindings.
//!
//! - `InventoryChart`: draws the projection chart into an SVG element and
//!   wires mouse events to the chart's event handler
//! - `SortableTable`: makes a `<table>` sortable by clicking its headers

pub mod dom;
pub mod table;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::DateTime;
use pantry_chart::{Chart, ChartEvent, ChartOptions, IdContext, NodeId};
use pantry_core::Dataset;
use pantry_table::{initial_order, SortOrder, TableSorter};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent};

use crate::dom::DomTarget;
use crate::table::DomTable;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Accept either an element or the id of one.
fn resolve_element(handle: &JsValue) -> Result<Element, JsValue> {
    if let Some(id) = handle.as_string() {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        return document
            .get_element_by_id(&id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", id)));
    }
    handle
        .clone()
        .dyn_into::<Element>()
        .map_err(|_| JsValue::from_str("expected an element or an element id"))
}

/// A mouse event listener, removed from its target when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let callback = self.closure.as_ref().unchecked_ref();
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, callback)
        {
            log::warn!("could not remove {} listener: {:?}", self.event, e);
        }
    }
}

fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Listener, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        event,
        closure,
    })
}

type SharedChart = Rc<RefCell<Chart<DomTarget>>>;

/// Pointer position in the root element's own coordinates, undoing any CSS scaling.
fn local_point(chart: &Chart<DomTarget>, event: &MouseEvent) -> Option<(f64, f64)> {
    let root = chart.target().element(chart.node())?;
    let width = chart.layout()?.width;
    let rect = root.get_bounding_client_rect();
    let scale = if rect.width() > 0.0 {
        width / rect.width()
    } else {
        1.0
    };
    Some((
        (event.client_x() as f64 - rect.left()) * scale,
        (event.client_y() as f64 - rect.top()) * scale,
    ))
}

fn dispatch(chart: &SharedChart, event: ChartEvent) {
    if let Err(e) = chart.borrow_mut().handle(event) {
        log::warn!("chart: {} while handling {:?}", e, event);
    }
}

fn dispatch_at<F>(chart: &SharedChart, event: &MouseEvent, make: F)
where
    F: Fn(f64, f64) -> ChartEvent,
{
    let point = local_point(&chart.borrow(), event);
    if let Some((x, y)) = point {
        dispatch(chart, make(x, y));
    }
}

fn wire_events(chart: &SharedChart) -> Result<Vec<Listener>, JsValue> {
    let (hover, brush) = {
        let c = chart.borrow();
        let Some((hover, brush)) = c.surfaces() else {
            return Ok(Vec::new());
        };
        let element = |id: NodeId| {
            c.target()
                .element(id)
                .cloned()
                .ok_or_else(|| JsValue::from_str("chart surface missing"))
        };
        (element(hover)?, element(brush)?)
    };
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let mut listeners = Vec::with_capacity(6);

    let c = chart.clone();
    listeners.push(listen(&hover, "mouseenter", move |_| {
        dispatch(&c, ChartEvent::PointerEnter)
    })?);
    let c = chart.clone();
    listeners.push(listen(&hover, "mousemove", move |e| {
        dispatch_at(&c, &e, |x, y| ChartEvent::PointerMove { x, y })
    })?);
    let c = chart.clone();
    listeners.push(listen(&hover, "mouseleave", move |_| {
        dispatch(&c, ChartEvent::PointerLeave)
    })?);

    let c = chart.clone();
    listeners.push(listen(&brush, "mousedown", move |e| {
        e.prevent_default();
        dispatch_at(&c, &e, |x, _| ChartEvent::BrushStart { x })
    })?);
    // drags may leave the overview, so follow them on the window
    let c = chart.clone();
    listeners.push(listen(&window, "mousemove", move |e| {
        if c.borrow().brushing() {
            dispatch_at(&c, &e, |x, _| ChartEvent::BrushMove { x })
        }
    })?);
    let c = chart.clone();
    listeners.push(listen(&window, "mouseup", move |e| {
        if c.borrow().brushing() {
            dispatch_at(&c, &e, |x, _| ChartEvent::BrushEnd { x })
        }
    })?);
    Ok(listeners)
}

#[wasm_bindgen]
pub struct InventoryChart {
    chart: SharedChart,
    // hold clones of `chart`; dropping them releases it
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl InventoryChart {
    /// Build a chart for `dataset` sized to `container`.
    ///
    /// The returned chart is not attached; insert `node()` where it should appear.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: JsValue,
        dataset: JsValue,
        height: Option<f64>,
        width: Option<f64>,
    ) -> Result<InventoryChart, JsValue> {
        let _ = pantry_log::init();
        let container = resolve_element(&container)?;
        let dataset: Dataset = serde_wasm_bindgen::from_value(dataset)?;
        log::info!("dataset: loaded {} items", dataset.items.len());
        let now = DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
            .ok_or_else(|| JsValue::from_str("clock out of range"))?;

        let prefix = match container.id() {
            id if !id.is_empty() => format!("{}-chart", id),
            _ => format!("pantry-{}", (js_sys::Math::random() * 1e9) as u64),
        };
        let target = DomTarget::new(container).map_err(js_error)?;
        let chart = Chart::new(
            target,
            &dataset.into_series(),
            now,
            ChartOptions { width, height },
            IdContext::new(prefix),
        )
        .map_err(js_error)?;

        let chart = Rc::new(RefCell::new(chart));
        let listeners = wire_events(&chart)?;
        Ok(InventoryChart {
            chart,
            _listeners: listeners,
        })
    }

    /// The chart's root `<svg>` element.
    pub fn node(&self) -> Option<Element> {
        let chart = self.chart.borrow();
        chart.target().element(chart.node()).cloned()
    }

    /// Names of the charted items, `undefined` when nothing was drawn.
    #[wasm_bindgen(getter)]
    pub fn items(&self) -> JsValue {
        self.chart
            .borrow()
            .items()
            .and_then(|names| serde_wasm_bindgen::to_value(&names).ok())
            .unwrap_or(JsValue::UNDEFINED)
    }
}

#[wasm_bindgen]
pub struct SortableTable {
    sorter: Rc<RefCell<TableSorter<DomTable>>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SortableTable {
    /// Fails on tables that cannot be sorted: wrong element, several header or
    /// body sections, spanned cells or unknown column types.
    #[wasm_bindgen(constructor)]
    pub fn new(
        table: JsValue,
        column: Option<u32>,
        direction: Option<String>,
    ) -> Result<SortableTable, JsValue> {
        let _ = pantry_log::init();
        let element = resolve_element(&table)?;
        let initial =
            initial_order(column.map(|c| c as usize), direction.as_deref()).map_err(js_error)?;

        let dom = DomTable::new(element);
        let headers = dom.header_cells();
        let sorter = Rc::new(RefCell::new(TableSorter::new(dom, initial).map_err(js_error)?));

        let mut listeners = Vec::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            let sorter = sorter.clone();
            listeners.push(listen(header, "click", move |_| {
                if let Err(e) = sorter.borrow_mut().click(index) {
                    log::warn!("table: {}", e);
                }
            })?);
        }
        Ok(SortableTable {
            sorter,
            _listeners: listeners,
        })
    }

    pub fn sort(&self, column: u32, direction: &str) -> Result<(), JsValue> {
        let order = direction.parse::<SortOrder>().map_err(js_error)?;
        self.sorter
            .borrow_mut()
            .sort_by(column as usize, order)
            .map_err(js_error)
    }

    /// Column settings and current order, one object per column.
    pub fn columns(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.sorter.borrow().columns())?)
    }
}
