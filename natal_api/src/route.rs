use crate::req::Method;

pub const PRODUCTS_PATH: &str = "/api/natal_tech_products";

// Ids pass through unparsed; the controller owns the validity check.
#[derive(Debug, PartialEq)]
pub enum Route {
    Index,
    ListProducts,
    GetProduct(String),
    CreateProduct,
    UpdateProduct(String),
    DeleteProduct(String),
    Preflight,
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Route {
        // Preflight is answered before routing, for any path.
        if let Method::OPTIONS = method {
            return Route::Preflight;
        }
        // One trailing slash is tolerated.
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        match (method, path) {
            (Method::GET, "/") => Route::Index,
            (Method::GET, PRODUCTS_PATH) => Route::ListProducts,
            (Method::POST, PRODUCTS_PATH) => Route::CreateProduct,
            _ => match Self::item_id(path) {
                Some(id) => match method {
                    Method::GET => Route::GetProduct(id.to_string()),
                    Method::PUT => Route::UpdateProduct(id.to_string()),
                    Method::DELETE => Route::DeleteProduct(id.to_string()),
                    _ => Route::NotFound,
                },
                None => Route::NotFound,
            },
        }
    }

    fn item_id(path: &str) -> Option<&str> {
        let rest = path.strip_prefix(PRODUCTS_PATH)?.strip_prefix('/')?;
        if rest.is_empty() || rest.contains('/') {
            return None;
        }
        Some(rest)
    }
}
