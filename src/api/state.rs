use std::sync::Arc;

use crate::{
    catalog::Catalog,
    services::{generator::GeneratorClient, images::ImageResolver},
};

/// Shared application state. The catalog is immutable after load, so
/// plain `Arc`s are enough; no locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub generator: Option<Arc<GeneratorClient>>,
    pub images: Arc<ImageResolver>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        generator: Option<GeneratorClient>,
        images: ImageResolver,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            generator: generator.map(Arc::new),
            images: Arc::new(images),
        }
    }
}
