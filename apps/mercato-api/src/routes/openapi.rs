//! OpenAPI description of the entity routes
//!
//! The CRUD handlers are generic, so their operations are added to the
//! document here instead of through per-handler annotations.

use std::collections::btree_map::Entry;

use utoipa::openapi::path::{Operation, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::Response;
use utoipa::openapi::{
    ArrayBuilder, Content, ContentBuilder, ObjectBuilder, OpenApi, PathItem, PathItemType, Ref, RefOr,
    Required, ResponseBuilder, Schema, SchemaType,
};
use utoipa::Modify;

/// Documentation of one entity's routes
struct EntityDoc {
    tag: &'static str,
    base: &'static str,
    /// Key components in path order; `likeDate` travels as a string
    keys: &'static [&'static str],
    schema: &'static str,
}

const ENTITIES: &[EntityDoc] = &[
    EntityDoc { tag: "carts", base: "/api/carts", keys: &["cartId"], schema: "CartDto" },
    EntityDoc { tag: "orders", base: "/api/orders", keys: &["orderId"], schema: "OrderDto" },
    EntityDoc { tag: "payments", base: "/api/payments", keys: &["paymentId"], schema: "PaymentDto" },
    EntityDoc { tag: "products", base: "/api/products", keys: &["productId"], schema: "ProductDto" },
    EntityDoc {
        tag: "shippings",
        base: "/api/shippings",
        keys: &["productId", "orderId"],
        schema: "OrderItemDto",
    },
    EntityDoc {
        tag: "favourites",
        base: "/api/favourites",
        keys: &["userId", "productId", "likeDate"],
        schema: "FavouriteDto",
    },
    EntityDoc { tag: "users", base: "/api/users", keys: &["userId"], schema: "UserDto" },
    EntityDoc { tag: "address", base: "/api/address", keys: &["addressId"], schema: "AddressDto" },
    EntityDoc {
        tag: "credentials",
        base: "/api/credentials",
        keys: &["credentialId"],
        schema: "CredentialDto",
    },
    EntityDoc {
        tag: "verificationTokens",
        base: "/api/verificationTokens",
        keys: &["verificationTokenId"],
        schema: "VerificationTokenDto",
    },
];

/// Adds list/get/save/update/delete operations for every entity
pub struct EntityPaths;

impl Modify for EntityPaths {
    fn modify(&self, openapi: &mut OpenApi) {
        for entity in ENTITIES {
            let keyed = format!(
                "{}/{}",
                entity.base,
                entity
                    .keys
                    .iter()
                    .map(|k| format!("{{{}}}", k))
                    .collect::<Vec<_>>()
                    .join("/")
            );

            let one = || RefOr::Ref(Ref::from_schema_name(entity.schema));
            let many = || RefOr::T(Schema::Array(ArrayBuilder::new().items(one()).build()));

            add(openapi, entity.base, PathItemType::Get, operation(entity, "List", None, many(), false));
            add(openapi, entity.base, PathItemType::Post, operation(entity, "Create", Some(one()), one(), false));
            add(openapi, entity.base, PathItemType::Put, operation(entity, "Update by embedded key", Some(one()), one(), false));
            add(openapi, &keyed, PathItemType::Get, operation(entity, "Get by key", None, one(), true));
            add(openapi, &keyed, PathItemType::Put, operation(entity, "Update by key", Some(one()), one(), true));
            add(openapi, &keyed, PathItemType::Delete, operation(entity, "Delete by key", None, boolean(), true));
        }
    }
}

fn add(openapi: &mut OpenApi, path: &str, method: PathItemType, operation: Operation) {
    match openapi.paths.paths.entry(path.to_string()) {
        Entry::Occupied(mut item) => {
            item.get_mut().operations.insert(method, operation);
        }
        Entry::Vacant(slot) => {
            slot.insert(PathItem::new(method, operation));
        }
    }
}

fn json(schema: RefOr<Schema>) -> Content {
    ContentBuilder::new().schema(schema).build()
}

fn boolean() -> RefOr<Schema> {
    RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(SchemaType::Boolean).build()))
}

fn error_response(description: &str) -> RefOr<Response> {
    RefOr::T(
        ResponseBuilder::new()
            .description(description)
            .content("application/json", json(RefOr::Ref(Ref::from_schema_name("ErrorResponse"))))
            .build(),
    )
}

fn operation(
    entity: &EntityDoc,
    summary: &str,
    body: Option<RefOr<Schema>>,
    response: RefOr<Schema>,
    by_key: bool,
) -> Operation {
    let mut builder = OperationBuilder::new()
        .tag(entity.tag)
        .summary(Some(format!("{} {}", summary, entity.tag)))
        .response(
            "200",
            RefOr::T(
                ResponseBuilder::new()
                    .description("Success")
                    .content("application/json", json(response))
                    .build(),
            ),
        )
        .response("502", error_response("A referenced service is unavailable"))
        .response("504", error_response("Composition deadline elapsed"));

    if by_key {
        for key in entity.keys {
            let schema_type = if *key == "likeDate" {
                SchemaType::String
            } else {
                SchemaType::Integer
            };
            builder = builder.parameter(
                ParameterBuilder::new()
                    .name(*key)
                    .parameter_in(ParameterIn::Path)
                    .required(Required::True)
                    .schema(Some(RefOr::T(Schema::Object(
                        ObjectBuilder::new().schema_type(schema_type).build(),
                    ))))
                    .build(),
            );
        }
        builder = builder
            .response("400", error_response("Malformed key"))
            .response("404", error_response("No entity under this key"));
    }

    if let Some(schema) = body {
        builder = builder
            .request_body(Some(
                RequestBodyBuilder::new()
                    .content("application/json", json(schema))
                    .required(Some(Required::True))
                    .build(),
            ))
            .response("400", error_response("Validation failed"));
    }

    builder.build()
}
