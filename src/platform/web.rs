//! Browser host: DOM, keyboard, and animation frames

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, Window};

use crate::error::{BoosterError, Result};
use crate::game_loop::{GameLoop, Scheduler};
use crate::renderer::CanvasSurface;
use crate::settings::Settings;
use crate::sim::input::{key_down, key_up};
use crate::sim::{Field, GamePhase, InputHandle, Rect};

type FrameCallback = Closure<dyn FnMut(f64)>;
type WebLoop = GameLoop<CanvasSurface, AnimationFrameScheduler>;

/// Schedules frames with `window.requestAnimationFrame`.
///
/// The callback slot is filled once the loop exists, since the callback
/// needs a handle to the loop itself. The callback clears `pending` when it
/// fires, so only one frame is ever queued.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Rc<RefCell<Option<FrameCallback>>>,
    pending: Rc<Cell<bool>>,
}

impl Scheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        if self.pending.get() {
            log::warn!("Frame already pending, ignoring request");
            return;
        }
        let Some(window) = web_sys::window() else {
            log::error!("No window, cannot schedule frame");
            return;
        };
        match self.callback.borrow().as_ref() {
            Some(callback) => {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(_) => self.pending.set(true),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
            None => log::warn!("Frame requested before callback was installed"),
        }
    }

    fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

fn host_err(context: &str, err: JsValue) -> BoosterError {
    BoosterError::Host(format!("{context}: {err:?}"))
}

/// Layout rect of an element, in page space
fn bounding_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Overlay a canvas on `root`, padded below by `lane_space`
fn create_field(
    document: &Document,
    root: &Element,
    lane_space: f32,
) -> Result<(Field, CanvasSurface)> {
    let container = bounding_rect(root);
    let field = Field::from_container(&container, lane_space);

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| host_err("create canvas", e))?
        .dyn_into()
        .map_err(|_| BoosterError::Host("created element is not a canvas".to_string()))?;
    canvas.set_width(field.width);
    canvas.set_height(field.height);

    let style = canvas.style();
    style
        .set_property("position", "absolute")
        .and_then(|_| style.set_property("top", &format!("{}px", field.top_offset)))
        .and_then(|_| style.set_property("left", &format!("{}px", field.left_offset)))
        .map_err(|e| host_err("style canvas", e))?;

    let surface = CanvasSurface::new(canvas.clone())?;
    root.append_child(&canvas).map_err(|e| host_err("append canvas", e))?;

    Ok((field, surface))
}

/// Snapshot the layout rects of every element matching `selector`
fn target_rects(document: &Document, selector: &str) -> Result<Vec<Rect>> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| host_err("query targets", e))?;

    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|el| bounding_rect(&el))
        .collect())
}

/// Wire keydown/keyup to the shared input cell
fn bind_controller(window: &Window, input: InputHandle) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| BoosterError::Host("no document".to_string()))?;

    {
        let input = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            key_down(&input, &event.key());
        });
        document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| host_err("bind keydown", e))?;
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            key_up(&input, &event.key());
        });
        document
            .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
            .map_err(|e| host_err("bind keyup", e))?;
        closure.forget();
    }

    Ok(())
}

fn on_frame(game: &Rc<RefCell<WebLoop>>) {
    // Release the borrow before any blocking alert
    let (result, reload) = {
        let mut g = game.borrow_mut();
        let result = g.frame();
        for event in g.drain_events() {
            log::debug!("{:?}", event);
        }
        (result, g.settings().reload_on_end)
    };

    match result {
        Ok(GamePhase::Running) => {}
        Ok(phase) => end_session(phase, reload),
        Err(e) => log::error!("Frame failed: {}", e),
    }
}

fn end_session(phase: GamePhase, reload: bool) {
    let message = match phase {
        GamePhase::GameOver => "GAME OVER",
        GamePhase::Cleared => "CLEAR!",
        GamePhase::Running => return,
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    if let Err(e) = window.alert_with_message(message) {
        log::warn!("alert failed: {:?}", e);
    }
    if reload {
        if let Err(e) = window.location().reload() {
            log::error!("reload failed: {:?}", e);
        }
    }
}

fn run(root_id: &str, target_selector: &str, settings_json: Option<&str>) -> Result<()> {
    let settings = match settings_json {
        Some(json) => Settings::from_json(json)?,
        None => Settings::default(),
    };

    let window = web_sys::window().ok_or_else(|| BoosterError::Host("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| BoosterError::Host("no document".to_string()))?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| BoosterError::Host(format!("root element #{root_id} not found")))?;

    let (field, surface) = create_field(&document, &root, settings.lane_space)?;
    let targets = target_rects(&document, target_selector)?;

    let scheduler = AnimationFrameScheduler::default();
    let slot = scheduler.callback.clone();
    let pending = scheduler.pending.clone();

    let mut game = WebLoop::new(settings, scheduler);
    game.init(field);
    game.attach_surface(surface);
    game.deploy(&targets)?;
    bind_controller(&window, game.input_handle())?;

    let game = Rc::new(RefCell::new(game));
    {
        let game = game.clone();
        *slot.borrow_mut() = Some(Closure::new(move |_time: f64| {
            pending.set(false);
            on_frame(&game);
        }));
    }
    game.borrow_mut().start()?;

    log::info!("Brick Booster running on #{} ({} targets)", root_id, targets.len());
    Ok(())
}

/// Turn every element matching `target_selector` into a brick and start playing
/// on a canvas laid over `#root_id`.
#[wasm_bindgen(js_name = startBrickBooster)]
pub fn start_brick_booster(
    root_id: &str,
    target_selector: &str,
    settings_json: Option<String>,
) -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already set on a second start
    let _ = console_log::init_with_level(log::Level::Info);

    run(root_id, target_selector, settings_json.as_deref())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
