pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod firework;
pub mod geometry;
pub mod orbit;
pub mod shaders;
pub mod sky;
pub mod text;
pub mod tween;

// Browser glue is only compiled for wasm32; everything above is plain Rust
// and tested on the host.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use crate::config::{SceneConfig, CONFIG_ELEMENT_ID};
    use crate::error::{Result, SceneError};
    use crate::text::font::Typeface;

    mod assets;
    mod events;
    mod fireworks;
    mod gl;
    mod panel;
    mod render;
    mod scene;
    mod sky_box;
    mod text_mesh;

    use scene::Scene;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        init_logging();

        setup().map_err(|err| {
            tracing::error!("scene setup failed: {err}");
            JsValue::from(err)
        })
    }

    fn init_logging() {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, Layer};
        use tracing_web::MakeWebConsoleWriter;

        let filter = EnvFilter::new("info");
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(MakeWebConsoleWriter::new())
            .with_filter(filter);

        // a test harness may already have installed one
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    }

    fn setup() -> Result<()> {
        let window = web_sys::window().ok_or(SceneError::Missing("window"))?;
        let document = window.document().ok_or(SceneError::Missing("document"))?;

        let config = load_config(&document)?;
        let canvas = find_canvas(&document)?;

        let scene = Rc::new(RefCell::new(Scene::new(canvas.clone(), config)?));
        panel::build(&document, &scene)?;
        events::attach(&document, &canvas, &scene)?;
        scene.borrow_mut().spawn_opening()?;
        load_assets(&scene);

        render::start(scene)
    }

    fn load_config(document: &Document) -> Result<SceneConfig> {
        match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(block) => {
                let json = block.text_content().unwrap_or_default();
                let config = SceneConfig::from_json(&json)?;
                tracing::info!("loaded scene config from #{CONFIG_ELEMENT_ID}");
                Ok(config)
            }
            None => Ok(SceneConfig::default()),
        }
    }

    fn find_canvas(document: &Document) -> Result<HtmlCanvasElement> {
        let element = document
            .query_selector("canvas.webgl")?
            .or_else(|| document.get_element_by_id("c"))
            .ok_or_else(|| SceneError::ElementNotFound("canvas.webgl".into()))?;
        element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SceneError::ElementNotFound("canvas.webgl".into()))
    }

    /// Starts the font and sprite downloads; each installs itself when done
    /// and a failure only costs that asset.
    fn load_assets(scene: &Rc<RefCell<Scene>>) {
        let (font_url, textures) = {
            let scene = scene.borrow();
            let config = scene.config();
            (config.font_url.clone(), config.particle_textures.clone())
        };

        {
            let scene = scene.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let face = assets::fetch_text(&font_url)
                    .await
                    .and_then(|json| Typeface::from_json(&json));
                match face {
                    Ok(face) => scene.borrow_mut().install_font(face),
                    Err(err) => tracing::error!(url = %font_url, "font unavailable: {err}"),
                }
            });
        }

        for (index, url) in textures.into_iter().enumerate() {
            let scene = scene.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let installed = match assets::load_image(&url).await {
                    Ok(image) => scene.borrow_mut().install_texture(index, &image),
                    Err(err) => Err(err),
                };
                if let Err(err) = installed {
                    tracing::warn!(url = %url, "particle texture unavailable: {err}");
                }
            });
        }
    }
}
