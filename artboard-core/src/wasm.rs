//! WebAssembly bindings for artboard-core.
//!
//! Browser hosts forward raw pointer events in canvas pixels and read scenes
//! and render frames back as JSON.

use wasm_bindgen::prelude::*;

use crate::{EditorConfig, EditorSession, KeyModifiers, Point, PointerButton, Scene, Selection};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

fn modifiers(shift: bool, ctrl: bool, alt: bool, meta: bool) -> KeyModifiers {
    KeyModifiers { shift, ctrl, alt, meta }
}

/// Map a DOM `MouseEvent.button` value.
fn button(code: u8) -> PointerButton {
    match code {
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    }
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Open a scene given as a JSON array of elements.
    ///
    /// # Errors
    ///
    /// Returns an error string if the scene JSON is invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(scene_json: &str) -> Result<WasmEditor, String> {
        let scene = Scene::from_json(scene_json).map_err(|e| e.to_string())?;
        Ok(Self {
            session: EditorSession::new(scene, EditorConfig::default()),
        })
    }

    /// Open a scene with an explicit configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error string if either document is invalid.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(scene_json: &str, config_json: &str) -> Result<WasmEditor, String> {
        let scene = Scene::from_json(scene_json).map_err(|e| e.to_string())?;
        let config = EditorConfig::from_json(config_json).map_err(|e| e.to_string())?;
        Ok(Self {
            session: EditorSession::new(scene, config),
        })
    }

    /// Press a button at a canvas position. Returns whether a gesture started.
    #[wasm_bindgen(js_name = pointerDown)]
    #[allow(clippy::fn_params_excessive_bools, clippy::too_many_arguments)]
    pub fn pointer_down(&mut self, x: f64, y: f64, button_code: u8, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.session
            .pointer_down(Point::new(x, y), button(button_code), modifiers(shift, ctrl, alt, meta))
    }

    /// Move the pointer. Returns whether a gesture is running.
    #[wasm_bindgen(js_name = pointerMove)]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.session
            .pointer_move(Point::new(x, y), modifiers(shift, ctrl, alt, meta))
            .is_some()
    }

    /// Release the pointer. Returns whether the scene changed.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up()
    }

    /// The pointer left the canvas.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> bool {
        self.session.pointer_leave()
    }

    /// Zoom for one wheel event.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
        self.session.wheel(Point::new(x, y), delta_y);
    }

    /// Undo the last commit.
    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    /// Redo the next commit.
    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    /// Delete the selection.
    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&mut self) -> usize {
        self.session.delete_selected()
    }

    /// Copy the selection.
    #[wasm_bindgen(js_name = copySelected)]
    pub fn copy_selected(&mut self) -> usize {
        self.session.copy_selected()
    }

    /// Paste the clipboard.
    pub fn paste(&mut self) -> usize {
        self.session.paste()
    }

    /// Select every visible, unlocked element.
    #[wasm_bindgen(js_name = selectAll)]
    pub fn select_all(&mut self) {
        self.session.select_all();
    }

    /// Raise the selection to the top.
    #[wasm_bindgen(js_name = bringToFront)]
    pub fn bring_to_front(&mut self) -> bool {
        self.session.bring_to_front()
    }

    /// Lower the selection to the bottom.
    #[wasm_bindgen(js_name = sendToBack)]
    pub fn send_to_back(&mut self) -> bool {
        self.session.send_to_back()
    }

    /// Raise the selection one step.
    #[wasm_bindgen(js_name = bringForward)]
    pub fn bring_forward(&mut self) -> bool {
        self.session.bring_forward()
    }

    /// Lower the selection one step.
    #[wasm_bindgen(js_name = sendBackward)]
    pub fn send_backward(&mut self) -> bool {
        self.session.send_backward()
    }

    /// Replace the selection from a JSON array of IDs.
    ///
    /// # Errors
    ///
    /// Returns an error string if the JSON is invalid.
    #[wasm_bindgen(js_name = setSelectionJson)]
    pub fn set_selection_json(&mut self, json: &str) -> Result<(), String> {
        let selection: Selection = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.session.set_selection(selection);
        Ok(())
    }

    /// Get the displayed scene as JSON.
    #[wasm_bindgen(js_name = getSceneJson)]
    #[must_use]
    pub fn get_scene_json(&self) -> String {
        self.session.scene().to_json().unwrap_or_default()
    }

    /// Get the render frame as JSON.
    #[wasm_bindgen(js_name = getFrameJson)]
    #[must_use]
    pub fn get_frame_json(&self) -> String {
        serde_json::to_string(&self.session.frame()).unwrap_or_default()
    }

    /// Whether an undo step is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.history().can_undo()
    }

    /// Whether a redo step is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.session.history().can_redo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"[{"id":"6f1c1f5e-8c1a-4c4e-9a57-0d7f4d3f2a10","type":"rect","x":0,"y":0,"width":50,"height":50,"fill":"red"}]"#;

    #[test]
    fn test_new_rejects_invalid_json() {
        assert!(WasmEditor::new("{ not valid json }").is_err());
    }

    #[test]
    fn test_with_config_rejects_out_of_range_values() {
        assert!(WasmEditor::with_config(SCENE, r#"{"associationThreshold": 2}"#).is_err());
    }

    #[test]
    fn test_drag_then_undo_round_trip() {
        let mut editor = WasmEditor::new(SCENE).expect("valid scene");
        assert!(editor.pointer_down(25.0, 25.0, 0, false, false, false, false));
        assert!(editor.pointer_move(35.0, 25.0, false, false, false, false));
        assert!(editor.pointer_up());
        assert!(editor.can_undo());
        assert!(editor.get_scene_json().contains("\"x\":10"));

        assert!(editor.undo());
        assert!(editor.can_redo());
        assert!(editor.get_scene_json().contains("\"x\":0"));
    }

    #[test]
    fn test_frame_json_is_valid() {
        let editor = WasmEditor::new(SCENE).expect("valid scene");
        let frame: serde_json::Value = serde_json::from_str(&editor.get_frame_json()).expect("json");
        assert!(frame.get("scene").is_some());
        assert!(frame.get("snapGuides").is_some());
    }
}
