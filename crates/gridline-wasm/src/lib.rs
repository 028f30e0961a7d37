//! WebAssembly bindings for the gridline grid engine.
//!
//! This crate exposes grid geometry, scaling, host messaging and the saved
//! grid store to JavaScript.
//!
//! ## Example
//!
//! ```js
//! import { GridEngine } from 'gridline';
//!
//! const engine = new GridEngine(msg => parent.postMessage({ pluginMessage: msg }, '*'));
//! onmessage = event => engine.receive(event.data.pluginMessage);
//!
//! const config = {
//!   columns: { count: 12, margin: 5, marginUnit: 'percent', gutterSize: 2, gutterUnit: 'percent' }
//! };
//!
//! // Preview on a 375 x 812 canvas
//! const geometry = engine.previewGeometry(config, 375, 812);
//!
//! // Apply to the selected frame, or get told to select one
//! engine.requestSelection();
//! const result = engine.applyGrid(config, true);
//!
//! // Save it
//! const saved = engine.createGrid({ name: 'Twelve', config, tags: ['web'] });
//!
//! // Presets are loaded once, then previewed at their own aspect ratio
//! engine.loadPresets(presets);
//! const slides = engine.previewPreset('slides-16-9', 375, 211);
//! ```

use gridline_core::{
    BaselineGridConfig, GridColor, GridConfig, GridDraft, GridId, GridPatch, GridPreset,
    PresetCatalog, StaticCatalog,
};
use gridline_host::{
    build_apply_grid_message, build_create_grid_frame_message, build_notify_message,
    ApplyGridRequest, ApplyOutcome, CreateGridFrameRequest, GridSession, HostEvent,
};
use gridline_layout::{baseline_lines, preview_geometry, scale, GridGeometry, PreviewOptions};
use gridline_store::{GridStore, StoreOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use wasm_bindgen::prelude::*;

mod port;
mod storage;

pub use port::JsHostPort;
pub use storage::{LocalStorageBackend, DEFAULT_STORAGE_KEY};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(debug_assertions)]
    console_error_panic_hook::set_once();
}

/// Result of `applyGrid` as seen from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyResultJs {
    applied: bool,
    width: Option<f64>,
    height: Option<f64>,
}

impl From<ApplyOutcome> for ApplyResultJs {
    fn from(outcome: ApplyOutcome) -> Self {
        match outcome {
            ApplyOutcome::Applied { width, height } => Self {
                applied: true,
                width: Some(width),
                height: Some(height),
            },
            ApplyOutcome::NoFrameSelected => Self {
                applied: false,
                width: None,
                height: None,
            },
        }
    }
}

/// The main gridline interface for JavaScript.
#[wasm_bindgen]
pub struct GridEngine {
    store: GridStore<LocalStorageBackend>,
    session: GridSession<JsHostPort>,
    preview: PreviewOptions,
    catalog: StaticCatalog,
}

#[wasm_bindgen]
impl GridEngine {
    /// Create an engine posting host commands through `post_message`.
    ///
    /// `options` are optional store options (`importMode`, `copySuffix`,
    /// `prettyExport`).
    #[wasm_bindgen(constructor)]
    pub fn new(post_message: Option<js_sys::Function>, options: JsValue) -> Result<GridEngine, JsError> {
        let options: StoreOptions = if options.is_undefined() || options.is_null() {
            StoreOptions::default()
        } else {
            from_js(options, "store options")?
        };

        Ok(Self {
            store: GridStore::open(LocalStorageBackend::default(), options),
            session: GridSession::new(JsHostPort::new(post_message)),
            preview: PreviewOptions::default(),
            catalog: StaticCatalog::default(),
        })
    }

    /// Get the version of the engine.
    #[wasm_bindgen(js_name = version)]
    pub fn version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    // Geometry

    /// Set the reference rectangle and scaling mode used by `previewGeometry`.
    #[wasm_bindgen(js_name = setPreviewOptions)]
    pub fn set_preview_options(&mut self, options: JsValue) -> Result<(), JsError> {
        self.preview = from_js(options, "preview options")?;
        Ok(())
    }

    /// Solve a grid on a `width` x `height` frame without scaling.
    #[wasm_bindgen(js_name = computeGeometry)]
    pub fn compute_geometry(&self, config: JsValue, width: f64, height: f64) -> Result<JsValue, JsError> {
        let config: GridConfig = from_js(config, "grid config")?;
        to_js_value(&GridGeometry::compute(&config, width, height))
    }

    /// Scale a grid from the preview reference onto the target and solve it.
    #[wasm_bindgen(js_name = previewGeometry)]
    pub fn preview_geometry(&self, config: JsValue, width: f64, height: f64) -> Result<JsValue, JsError> {
        let config: GridConfig = from_js(config, "grid config")?;
        to_js_value(&preview_geometry(&config, &self.preview, width, height))
    }

    /// Baseline guide lines for a baseline config over `extent` pixels.
    #[wasm_bindgen(js_name = baselineLines)]
    pub fn baseline_lines(&self, baseline: JsValue, extent: f64) -> Result<JsValue, JsError> {
        let baseline: BaselineGridConfig = from_js(baseline, "baseline config")?;
        let lines: Vec<_> = baseline_lines(&baseline, extent).collect();
        to_js_value(&lines)
    }

    /// Scale a grid authored at the reference size onto the target size.
    #[wasm_bindgen(js_name = scaleGrid)]
    pub fn scale_grid(
        &self,
        config: JsValue,
        reference_width: f64,
        reference_height: f64,
        target_width: f64,
        target_height: f64,
        preserve_proportions: bool,
    ) -> Result<JsValue, JsError> {
        let config: GridConfig = from_js(config, "grid config")?;
        let scaled = scale(
            &config,
            reference_width,
            reference_height,
            target_width,
            target_height,
            preserve_proportions,
        )
        .map_err(|e| JsError::new(&format!("Scale error: {}", e)))?;
        to_js_value(&scaled)
    }

    // Host

    /// Feed a message received from the host. Returns false for messages
    /// that are not host events.
    #[wasm_bindgen]
    pub fn receive(&mut self, message: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<HostEvent>(message) {
            Ok(event) => {
                self.session.port_mut().receive(&event);
                true
            }
            Err(err) => {
                debug!(%err, "ignoring unrecognized host message");
                false
            }
        }
    }

    #[wasm_bindgen(js_name = requestSelection)]
    pub fn request_selection(&mut self) {
        self.session.request_selection();
    }

    /// Last selection reported by the host.
    #[wasm_bindgen]
    pub fn selection(&self) -> Result<JsValue, JsError> {
        to_js_value(&self.session.selection())
    }

    #[wasm_bindgen(js_name = canApply)]
    pub fn can_apply(&self) -> bool {
        self.session.can_apply()
    }

    /// Apply a grid to the selected frame, scaled from the preview reference.
    #[wasm_bindgen(js_name = applyGrid)]
    pub fn apply_grid(&mut self, config: JsValue, replace_existing: bool) -> Result<JsValue, JsError> {
        let config: GridConfig = from_js(config, "grid config")?;
        let outcome = self.session.apply(&config, &self.preview, replace_existing);
        to_js_value(&ApplyResultJs::from(outcome))
    }

    #[wasm_bindgen(js_name = createGridFrame)]
    pub fn create_grid_frame(
        &mut self,
        config: JsValue,
        name: &str,
        width: f64,
        height: f64,
    ) -> Result<(), JsError> {
        let config: GridConfig = from_js(config, "grid config")?;
        self.session.create_frame(&config, name, width, height);
        Ok(())
    }

    #[wasm_bindgen]
    pub fn notify(&mut self, message: &str) {
        self.session.notify(message);
    }

    // Presets

    /// Replace the preset catalog with a JS array of presets.
    #[wasm_bindgen(js_name = loadPresets)]
    pub fn load_presets(&mut self, presets: JsValue) -> Result<usize, JsError> {
        let presets: Vec<GridPreset> = from_js(presets, "presets")?;
        debug!(count = presets.len(), "loaded preset catalog");
        let count = presets.len();
        self.catalog = StaticCatalog::new(presets);
        Ok(count)
    }

    /// Presets in catalog order, optionally limited to one category.
    #[wasm_bindgen]
    pub fn presets(&self, category: Option<String>) -> Result<JsValue, JsError> {
        match category {
            Some(category) => {
                let presets: Vec<_> = self.catalog.by_category(&category).collect();
                to_js_value(&presets)
            }
            None => to_js_value(self.catalog.presets()),
        }
    }

    #[wasm_bindgen(js_name = presetCategories)]
    pub fn preset_categories(&self) -> Vec<String> {
        self.catalog.categories().into_iter().map(str::to_string).collect()
    }

    /// Solve a preset on a `width` x `height` frame, scaled from the
    /// rectangle its aspect ratio implies.
    #[wasm_bindgen(js_name = previewPreset)]
    pub fn preview_preset(&self, id: &str, width: f64, height: f64) -> Result<JsValue, JsError> {
        let preset = self.preset(id)?;
        let options = PreviewOptions::for_preset(preset);
        to_js_value(&preview_geometry(&preset.config, &options, width, height))
    }

    /// Apply a preset to the selected frame.
    #[wasm_bindgen(js_name = applyPreset)]
    pub fn apply_preset(&mut self, id: &str, replace_existing: bool) -> Result<JsValue, JsError> {
        let preset = self.preset(id)?;
        let options = PreviewOptions::for_preset(preset);
        let config = preset.config.clone();
        let outcome = self.session.apply(&config, &options, replace_existing);
        to_js_value(&ApplyResultJs::from(outcome))
    }

    /// Create a new frame carrying a preset at its reference size.
    #[wasm_bindgen(js_name = createPresetFrame)]
    pub fn create_preset_frame(&mut self, id: &str) -> Result<(), JsError> {
        let preset = self.preset(id)?.clone();
        self.session.create_preset_frame(&preset);
        Ok(())
    }

    /// Save a copy of a preset as a new grid.
    #[wasm_bindgen(js_name = savePreset)]
    pub fn save_preset(&mut self, id: &str) -> Result<JsValue, JsError> {
        let draft = GridDraft::from_preset(self.preset(id)?);
        let grid = self.store.create(draft).map_err(store_error)?;
        to_js_value(&grid)
    }

    fn preset(&self, id: &str) -> Result<&GridPreset, JsError> {
        self.catalog
            .get(id)
            .ok_or_else(|| JsError::new(&format!("Unknown preset: {}", id)))
    }

    // Saved grids

    #[wasm_bindgen(js_name = savedGrids)]
    pub fn saved_grids(&self) -> Result<JsValue, JsError> {
        to_js_value(self.store.grids())
    }

    #[wasm_bindgen(js_name = getGrid)]
    pub fn get_grid(&self, id: &str) -> Result<JsValue, JsError> {
        to_js_value(&self.store.get(&GridId::from(id)))
    }

    #[wasm_bindgen(js_name = createGrid)]
    pub fn create_grid(&mut self, draft: JsValue) -> Result<JsValue, JsError> {
        let draft: GridDraft = from_js(draft, "grid draft")?;
        let grid = self.store.create(draft).map_err(store_error)?;
        to_js_value(&grid)
    }

    #[wasm_bindgen(js_name = updateGrid)]
    pub fn update_grid(&mut self, id: &str, patch: JsValue) -> Result<JsValue, JsError> {
        let patch: GridPatch = from_js(patch, "grid update")?;
        let grids = self.store.update(&GridId::from(id), patch).map_err(store_error)?;
        to_js_value(grids)
    }

    #[wasm_bindgen(js_name = deleteGrid)]
    pub fn delete_grid(&mut self, id: &str) -> Result<JsValue, JsError> {
        let grids = self.store.delete(&GridId::from(id)).map_err(store_error)?;
        to_js_value(grids)
    }

    /// Copy a saved grid. Resolves to `null` if the id is unknown.
    #[wasm_bindgen(js_name = duplicateGrid)]
    pub fn duplicate_grid(&mut self, id: &str) -> Result<JsValue, JsError> {
        let copy = self.store.duplicate(&GridId::from(id)).map_err(store_error)?;
        to_js_value(&copy)
    }

    #[wasm_bindgen(js_name = searchGrids)]
    pub fn search_grids(&self, query: &str) -> Result<JsValue, JsError> {
        to_js_value(&self.store.search(query))
    }

    #[wasm_bindgen(js_name = allTags)]
    pub fn all_tags(&self) -> Vec<String> {
        self.store.all_tags().into_iter().map(str::to_string).collect()
    }

    /// Export every saved grid as a versioned JSON document.
    #[wasm_bindgen(js_name = exportGrids)]
    pub fn export_grids(&self) -> Result<String, JsError> {
        self.store.export_json().map_err(store_error)
    }

    /// Import a document produced by `exportGrids`.
    ///
    /// Resolves to `{ success, grids?, error?, count }`.
    #[wasm_bindgen(js_name = importGrids)]
    pub fn import_grids(&mut self, json: &str) -> Result<JsValue, JsError> {
        to_js_value(&self.store.import_from(json))
    }

    #[wasm_bindgen(js_name = clearGrids)]
    pub fn clear_grids(&mut self) -> Result<(), JsError> {
        self.store.clear().map_err(store_error)
    }
}

/// Build an `apply-grid` command without sending it.
#[wasm_bindgen(js_name = buildApplyGridMessage)]
pub fn build_apply_grid_message_js(
    config: JsValue,
    width: f64,
    height: f64,
    replace_existing: bool,
) -> Result<JsValue, JsError> {
    let config: GridConfig = from_js(config, "grid config")?;
    to_js_value(&build_apply_grid_message(ApplyGridRequest {
        config,
        width,
        height,
        replace_existing,
    }))
}

/// Build a `create-grid-frame` command without sending it.
#[wasm_bindgen(js_name = buildCreateGridFrameMessage)]
pub fn build_create_grid_frame_message_js(
    config: JsValue,
    frame_name: String,
    width: f64,
    height: f64,
    position_near_selection: bool,
) -> Result<JsValue, JsError> {
    let config: GridConfig = from_js(config, "grid config")?;
    to_js_value(&build_create_grid_frame_message(CreateGridFrameRequest {
        config,
        frame_name,
        width,
        height,
        position_near_selection,
    }))
}

#[wasm_bindgen(js_name = buildNotifyMessage)]
pub fn build_notify_message_js(message: &str) -> Result<JsValue, JsError> {
    to_js_value(&build_notify_message(message))
}

/// Parse a hex color such as `#FF5733` or `FF573380`. Resolves to `null`
/// when the string is not a color.
#[wasm_bindgen(js_name = parseColor)]
pub fn parse_color(hex: &str) -> Result<JsValue, JsError> {
    to_js_value(&GridColor::from_hex(hex))
}

/// CSS `rgba()` string for an overlay color.
#[wasm_bindgen(js_name = colorToCss)]
pub fn color_to_css(color: JsValue) -> Result<String, JsError> {
    let color: GridColor = from_js(color, "color")?;
    Ok(color.to_css())
}

/// Get the engine version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize to plain JS objects and arrays (no `Map`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    to_js(value).map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

fn store_error(err: gridline_store::StoreError) -> JsError {
    JsError::new(&format!("Storage error: {}", err))
}
