use spacebg_core::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Current `innerWidth` x `innerHeight` of the window in CSS pixels.
pub fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width.max(0.0) as u32, height.max(0.0) as u32))
}

/// Window `resize` listener, detached again on drop.
pub struct ResizeListener {
    window: Window,
    callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
    pub fn attach(window: &Window, mut on_resize: impl FnMut(Viewport) + 'static) -> Result<Self, JsValue> {
        let target = window.clone();
        let callback = Closure::wrap(Box::new(move || match window_viewport(&target) {
            Ok(viewport) => on_resize(viewport),
            Err(e) => log::warn!("Failed to read window size: {e:?}"),
        }) as Box<dyn FnMut()>);

        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;

        Ok(Self {
            window: window.clone(),
            callback,
        })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
    }
}
