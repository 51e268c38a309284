#[macro_use]
mod trace;

pub mod ast;
pub mod ddl;
pub mod loader;

use thiserror::Error;
use wasm_bindgen::prelude::*;

use ddl::{CompileError, DdlEmitter};
use loader::LoadError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Compile a JSON schema document into one `CREATE TABLE` statement per table.
pub fn compile_str(source: &str) -> Result<Vec<String>, Error> {
    let document = loader::load(source)?;
    let statements = DdlEmitter::default().emit(&document)?;
    Ok(statements)
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Compile a JSON schema to an array of DDL statements
#[wasm_bindgen(js_name = "jsonToDdl")]
pub fn json_to_ddl(source: &str) -> Result<js_sys::Array, String> {
    let statements = compile_str(source).map_err(|e| e.to_string())?;
    let array = js_sys::Array::new();
    for statement in statements {
        array.push(&JsValue::from(statement));
    }
    Ok(array)
}
