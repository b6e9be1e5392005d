use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spacebg_core::{scene_rng, AnimationControls, SceneConfig, SpaceScene, Viewport};
use spacebg_wgpu::SpaceRenderer;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::frame_loop::FrameLoop;
use crate::viewport::{window_viewport, ResizeListener};

/// Scene plus the renderer drawing it, shared by the frame loop and the resize listener.
struct RenderState {
    scene: SpaceScene,
    renderer: SpaceRenderer<'static>,
}

impl RenderState {
    /// Step the camera with one controls snapshot and draw. False stops the loop.
    fn frame(&mut self, controls: &AnimationControls) -> bool {
        self.scene.step(controls);
        match self.renderer.render(&self.scene) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Render failed, stopping frame loop: {e}");
                false
            }
        }
    }

    fn resize(&mut self, canvas: &HtmlCanvasElement, viewport: Viewport) {
        if !self.scene.resize(viewport) {
            return;
        }
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);
        self.renderer.resize(viewport);
        log::debug!("Resized to {}x{}", viewport.width, viewport.height);
    }
}

/// Handle returned to JavaScript. Speed fields are live: a change is picked
/// up by the very next frame. Dropping (`free()`) the handle stops the loop
/// and detaches the resize listener.
#[wasm_bindgen]
pub struct SpaceBackground {
    controls: Rc<Cell<AnimationControls>>,
    state: Rc<RefCell<RenderState>>,
    frame_loop: FrameLoop,
    _resize: ResizeListener,
}

impl SpaceBackground {
    /// Build the scene on `canvas_id`, bind the renderer and start animating.
    pub async fn create(canvas_id: &str, config: SceneConfig) -> Result<SpaceBackground, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas")?;

        let viewport = window_viewport(&window)?;
        canvas.set_width(viewport.width);
        canvas.set_height(viewport.height);

        let mut rng = scene_rng(config.seed);
        let scene = SpaceScene::build(&config, viewport, &mut rng);
        let renderer = SpaceRenderer::new(
            wgpu::SurfaceTarget::Canvas(canvas.clone()),
            viewport,
            &scene,
            &config.renderer,
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("Failed to create renderer: {e}")))?;

        let controls = Rc::new(Cell::new(AnimationControls::from_config(&config.speed)));
        let state = Rc::new(RefCell::new(RenderState { scene, renderer }));

        let frame_loop = {
            let controls = Rc::clone(&controls);
            let state = Rc::clone(&state);
            FrameLoop::new(move || {
                let snapshot = controls.get();
                state.borrow_mut().frame(&snapshot)
            })
        };

        let resize = {
            let state = Rc::clone(&state);
            ResizeListener::attach(&window, move |viewport| {
                state.borrow_mut().resize(&canvas, viewport);
            })?
        };

        frame_loop.start().map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(SpaceBackground {
            controls,
            state,
            frame_loop,
            _resize: resize,
        })
    }

    fn update(&self, f: impl FnOnce(&mut AnimationControls)) {
        let mut controls = self.controls.get();
        f(&mut controls);
        self.controls.set(controls);
    }
}

#[wasm_bindgen]
impl SpaceBackground {
    #[wasm_bindgen(getter, js_name = currentSpeed)]
    pub fn current_speed(&self) -> f64 {
        self.controls.get().current_speed
    }

    #[wasm_bindgen(setter, js_name = currentSpeed)]
    pub fn set_current_speed(&self, speed: f64) {
        self.update(|c| c.current_speed = speed);
    }

    #[wasm_bindgen(getter, js_name = baseSpeed)]
    pub fn base_speed(&self) -> f64 {
        self.controls.get().base_speed
    }

    #[wasm_bindgen(setter, js_name = baseSpeed)]
    pub fn set_base_speed(&self, speed: f64) {
        self.update(|c| c.base_speed = speed);
    }

    #[wasm_bindgen(getter, js_name = boostSpeed)]
    pub fn boost_speed(&self) -> f64 {
        self.controls.get().boost_speed
    }

    #[wasm_bindgen(setter, js_name = boostSpeed)]
    pub fn set_boost_speed(&self, speed: f64) {
        self.update(|c| c.boost_speed = speed);
    }

    /// Switch to boost speed.
    pub fn boost(&self) {
        self.update(AnimationControls::boost);
    }

    /// Back to base speed.
    pub fn cruise(&self) {
        self.update(AnimationControls::cruise);
    }

    /// Resume a stopped loop. Fails if it is already running.
    pub fn start(&self) -> Result<(), JsValue> {
        self.frame_loop
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Cancel the pending frame. Returns whether the loop was running.
    pub fn stop(&self) -> bool {
        self.frame_loop.stop()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    #[wasm_bindgen(js_name = cameraDepth)]
    pub fn camera_depth(&self) -> f64 {
        self.state.borrow().scene.camera.depth()
    }

    #[wasm_bindgen(js_name = starfieldOffset)]
    pub fn starfield_offset(&self) -> f64 {
        self.state.borrow().scene.starfield.offset_z
    }

    /// Asteroids that survived frustum culling in the last drawn frame.
    #[wasm_bindgen(js_name = visibleAsteroids)]
    pub fn visible_asteroids(&self) -> u32 {
        self.state.borrow().renderer.visible_asteroids()
    }
}
