//! Error type shared by the scene setup path and the asset loaders.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("element `{0}` not found")]
    ElementNotFound(String),

    #[error("WebGL2 not supported")]
    WebGl2Unsupported,

    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("failed to link program: {0}")]
    ProgramLink(String),

    #[error("failed to create {0}")]
    Allocation(&'static str),

    #[error("invalid font: {0}")]
    Font(#[from] serde_json::Error),

    #[error("font has no glyph for {0:?} and no `?` fallback")]
    MissingGlyph(char),

    #[error("malformed outline command `{0}`")]
    Outline(String),

    #[error("invalid scene config: {0}")]
    Config(String),

    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for SceneError {
    fn from(value: JsValue) -> Self {
        SceneError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = SceneError> = std::result::Result<T, E>;
