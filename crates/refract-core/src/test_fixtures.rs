//! Shared fixtures: a small domain (testers, products, posts) mirroring a
//! typical API payload, plus schemas exercising every declaration form.

use crate::{
    schema::{SchemaBuilder, SchemaRegistry},
    traits::{FieldCx, ObjectIdentity, Projectable},
    value::{FieldValue, Json},
};
use serde::Serialize;
use serde_json::json;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

///
/// Product
///

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Product {
    pub id: u64,
    pub name: String,
}

impl Projectable for Product {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(json!(self.id).into()),
            "name" => Some(json!(self.name).into()),
            _ => None,
        }
    }

    fn raw_json(&self) -> Json {
        json!({ "id": self.id, "name": self.name })
    }
}

///
/// Post
///

#[derive(Clone, Debug, Serialize)]
pub(crate) struct Post {
    pub id: u64,
    pub title: String,
    pub blurb: String,
}

impl Projectable for Post {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(json!(self.id).into()),
            "title" => Some(json!(self.title).into()),
            "blurb" => Some(json!(self.blurb).into()),
            _ => None,
        }
    }

    fn raw_json(&self) -> Json {
        json!({ "id": self.id, "title": self.title, "blurb": self.blurb })
    }
}

///
/// Tester
///

#[derive(Clone, Debug)]
pub(crate) struct Tester {
    pub id: u64,
    pub version: u64,
    pub name: String,
    pub last_name: String,
    pub products: Vec<Product>,
    pub post: Option<Post>,
}

impl Tester {
    pub fn sample() -> Self {
        Self {
            id: 1,
            version: 1,
            name: "Mike".to_string(),
            last_name: "Sea".to_string(),
            products: Vec::new(),
            post: None,
        }
    }
}

impl Projectable for Tester {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(json!(self.id).into()),
            "name" => Some(json!(self.name).into()),
            "last_name" => Some(json!(self.last_name).into()),
            "product" => Some(FieldValue::many(self.products.clone())),
            "post" => Some(
                self.post
                    .clone()
                    .map_or(FieldValue::Json(Json::Null), FieldValue::one),
            ),
            _ => None,
        }
    }

    fn raw_json(&self) -> Json {
        json!({ "id": self.id, "name": self.name, "last_name": self.last_name })
    }

    fn identity(&self) -> Option<ObjectIdentity> {
        Some(ObjectIdentity::new(self.id.to_string(), self.version))
    }
}

///
/// CountingDoc
/// Tracks accessor invocations so cache tests can prove a field was read
/// at most once.
///

#[derive(Clone, Debug)]
pub(crate) struct CountingDoc {
    pub id: u64,
    pub version: u64,
    pub body: String,
    pub body_reads: Arc<AtomicUsize>,
}

impl Projectable for CountingDoc {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(json!(self.id).into()),
            "body" => {
                self.body_reads.fetch_add(1, Ordering::SeqCst);
                Some(json!(self.body).into())
            }
            _ => None,
        }
    }

    fn raw_json(&self) -> Json {
        json!({ "id": self.id, "body": self.body })
    }

    fn identity(&self) -> Option<ObjectIdentity> {
        Some(ObjectIdentity::new(self.id.to_string(), self.version))
    }
}

///
/// Viewer
/// Principal used by permission fixtures.
///

#[derive(Clone, Debug)]
pub(crate) struct Viewer {
    pub id: u64,
    pub admin: bool,
}

///
/// Account
/// `email` is principal-gated.
///

#[derive(Clone, Debug)]
pub(crate) struct Account {
    pub id: u64,
    pub owner_id: u64,
    pub email: String,
}

impl Projectable for Account {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(json!(self.id).into()),
            "email" => Some(json!(self.email).into()),
            _ => None,
        }
    }

    fn raw_json(&self) -> Json {
        json!({ "id": self.id, "email": self.email })
    }
}

/// Registry covering the fixture domain.
pub(crate) fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();

    registry.register::<Tester>(
        SchemaBuilder::<Tester>::new()
            .attributes(["id", "name"])
            .optional(["last_name"])
            .associations(["product", "post"])
            .default_associations(["product"])
            .build()
            .expect("tester schema"),
    );

    registry.register::<Product>(
        SchemaBuilder::<Product>::new()
            .attributes(["id", "name"])
            .key("product", "products")
            .build()
            .expect("product schema"),
    );

    registry.register::<Post>(
        SchemaBuilder::<Post>::new()
            .attributes(["id", "title", "blurb"])
            .optional(["joke"])
            .associations(["myself"])
            .permission("title", |_post, _cx| true)
            .resolve_with("joke", |_post, _cx| {
                json!("Why was six afraid of seven?").into()
            })
            .resolve_with("myself", |post: &Post, _cx| FieldValue::one(post.clone()))
            .build()
            .expect("post schema"),
    );

    registry.register::<CountingDoc>(
        SchemaBuilder::<CountingDoc>::new()
            .attributes(["id", "body"])
            .caches(["body"])
            .build()
            .expect("counting doc schema"),
    );

    registry.register::<Account>(
        SchemaBuilder::<Account>::new()
            .attributes(["id", "email"])
            .permission("email", |account: &Account, cx: &FieldCx<'_>| {
                cx.principal::<Viewer>()
                    .is_some_and(|viewer| viewer.admin || viewer.id == account.owner_id)
            })
            .build()
            .expect("account schema"),
    );

    registry
}
