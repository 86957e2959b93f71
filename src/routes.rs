use serde::Serialize;

use crate::error::Result;
use crate::paginator::calc_page_count;
use crate::post_collection::{PostCollection, TaxonomyFilter, TaxonomyKind};

/// A static page the site build has to materialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Route {
    /// A page of posts, optionally restricted to one taxonomy value
    Listing {
        path: String,
        page: u32,
        filter: Option<TaxonomyFilter>,
    },
    /// Every value of a taxonomy
    Taxonomies {
        path: String,
        kind: TaxonomyKind,
    },
    Post {
        path: String,
    },
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Listing { path, .. } => path,
            Route::Taxonomies { path, .. } => path,
            Route::Post { path } => path,
        }
    }
}

/// `/page/{n}/` or `/{category|tag}/{value}/` + `page/{n}/` past the first page.
pub fn listing_path(filter: Option<&TaxonomyFilter>, page: u32) -> String {
    match filter {
        None => format!("/page/{}/", page),
        Some(filter) => {
            let base = format!("/{}/{}/", filter.kind().singular(), urlencoding::encode(filter.value()));
            if page <= 1 {
                base
            } else {
                format!("{}page/{}/", base, page)
            }
        }
    }
}

/// The home page plus one `/page/{n}/` route per page of the whole collection.
pub fn home_routes(collection: &PostCollection, page_size: u32) -> Vec<Route> {
    let page_count = calc_page_count(collection.len(), page_size);
    let mut routes = vec![Route::Listing { path: "/".to_string(), page: 1, filter: None }];
    routes.extend((1..=page_count).map(|page| Route::Listing {
        path: listing_path(None, page),
        page,
        filter: None,
    }));
    routes
}

/// The index page of `kind` plus, for every value, one route per page of its posts.
pub fn taxonomy_routes(collection: &PostCollection, kind: TaxonomyKind, page_size: u32) -> Result<Vec<Route>> {
    let mut routes = vec![Route::Taxonomies { path: format!("/{}/", kind.plural()), kind }];

    for value in collection.list_values(kind) {
        let filter = TaxonomyFilter::from_value(kind, &value)?;
        let page_count = calc_page_count(collection.filter(&filter).len(), page_size);
        for page in 1..=page_count {
            routes.push(Route::Listing {
                path: listing_path(Some(&filter), page),
                page,
                filter: Some(filter.clone()),
            });
        }
    }

    Ok(routes)
}

pub fn post_routes(collection: &PostCollection) -> Vec<Route> {
    collection.all().iter()
        .map(|post| Route::Post { path: post.url.clone() })
        .collect()
}

/// Every route of the site: home listing, categories, tags and posts.
pub fn all_routes(collection: &PostCollection, page_size: u32, taxonomy_page_size: u32) -> Result<Vec<Route>> {
    let mut routes = home_routes(collection, page_size);
    routes.extend(taxonomy_routes(collection, TaxonomyKind::Categories, taxonomy_page_size)?);
    routes.extend(taxonomy_routes(collection, TaxonomyKind::Tags, taxonomy_page_size)?);
    routes.extend(post_routes(collection));
    Ok(routes)
}
