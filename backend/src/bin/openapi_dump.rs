//! Print the OpenAPI document as JSON.

use color_eyre::eyre::{Result, WrapErr};
use tender_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialising OpenAPI document")?;
    println!("{json}");
    Ok(())
}
