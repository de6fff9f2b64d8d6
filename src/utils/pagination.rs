//! Paginación de listados
//!
//! Parámetros page/limit con los mismos defaults que consume el cliente
//! móvil (page=1, limit=10) y metadatos de respuesta.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Parámetros de paginación normalizados
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Normalizar page/limit de la query string
pub fn get_pagination(page: Option<i64>, limit: Option<i64>) -> PageParams {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    PageParams {
        page,
        limit,
        offset: (page - 1) * limit,
    }
}

/// Metadatos de paginación en las respuestas de listado
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(params: PageParams, total: i64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            // división con redondeo hacia arriba
            total_pages: (total + params.limit - 1) / params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = get_pagination(None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_offset_math() {
        let params = get_pagination(Some(3), Some(25));
        assert_eq!(params.offset, 50);
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let params = get_pagination(Some(0), Some(10_000));
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let params = get_pagination(Some(1), Some(10));
        assert_eq!(Pagination::new(params, 0).total_pages, 0);
        assert_eq!(Pagination::new(params, 10).total_pages, 1);
        assert_eq!(Pagination::new(params, 11).total_pages, 2);
    }
}
