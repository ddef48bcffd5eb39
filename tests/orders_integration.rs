use actix_web::test::TestRequest;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use sqlx::{PgPool, Row};

use garments_api::auth::RequireAuth;
use garments_api::db;
use garments_api::models::{ProductInput, USER_TYPE_BUSINESS, USER_TYPE_INDIVIDUAL};
use garments_api::api;

mod support;

fn scopes() -> actix_web::Scope {
    web::scope("/api")
        .service(api::auth::individual_login)
        .service(api::auth::individual_signup)
        .service(api::products::list_products)
        .service(api::products::get_product)
        .service(
            web::scope("/individual")
                .wrap(RequireAuth::roles(&[USER_TYPE_INDIVIDUAL]))
                .service(api::individual::get_orders)
                .service(api::individual::create_order),
        )
        .service(
            web::scope("/cart")
                .wrap(RequireAuth::roles(&[USER_TYPE_BUSINESS, USER_TYPE_INDIVIDUAL]))
                .service(api::products::get_cart)
                .service(api::products::add_to_cart)
                .service(api::products::update_cart_item)
                .service(api::products::remove_from_cart)
                .service(api::products::clear_cart),
        )
}

async fn seed_product(pool: &PgPool, name: &str, selling_price: f64) -> i32 {
    let input = ProductInput {
        name: Some(name.to_string()),
        description: Some(format!("{name} description")),
        price: Some(selling_price + 100.0),
        selling_price: Some(selling_price),
        images: Some(vec!["http://localhost/img.jpg".to_string()]),
        available_sizes: Some(vec!["S".to_string(), "M".to_string(), "L".to_string()]),
        specifications: Some(json!({"fabric": "cotton"})),
    };
    db::products::create_product(pool, &input)
        .await
        .expect("seed product")
}

/// Signs up and logs in an individual user, returning a bearer token.
async fn individual_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let req = TestRequest::post()
        .uri("/api/auth/individual/signup")
        .set_json(json!({
            "name": "Ravi Kumar",
            "email": email,
            "contactNumber": "9876501234",
            "address": "4 Lake View, Pune",
            "password": "secret-pass",
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);

    let req = TestRequest::post()
        .uri("/api/auth/individual/login")
        .set_json(json!({"email": email, "password": "secret-pass"}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    body["data"]["token"].as_str().expect("token").to_string()
}

#[actix_web::test]
async fn order_snapshots_items_and_totals_server_side() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let shirt_id = seed_product(&pool, "Oxford Shirt", 749.0).await;
    let tie_id = seed_product(&pool, "Silk Tie", 250.0).await;

    let token = individual_token(&app, "orders@example.com").await;

    // Client-supplied prices must be ignored in favor of the stored ones.
    let req = TestRequest::post()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "items": [
                {"productId": shirt_id, "quantity": 2, "size": "M", "price": 1.0},
                {"productId": tie_id, "quantity": 1},
            ],
            "deliveryAddress": "4 Lake View, Pune",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalAmount"], json!(2.0 * 749.0 + 250.0));
    assert_eq!(body["data"]["status"], json!("pending"));
    let order_id = body["data"]["orderId"].as_i64().expect("order id");

    let item_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
            .bind(order_id as i32)
            .fetch_one(&pool)
            .await
            .expect("count items");
    assert_eq!(item_count, 2);

    // A later price change must not touch the stored snapshot.
    let reprice = ProductInput {
        selling_price: Some(9999.0),
        ..Default::default()
    };
    assert!(db::products::update_product(&pool, shirt_id, &reprice)
        .await
        .expect("reprice"));

    let req = TestRequest::get()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let order = &body["data"][0];
    assert_eq!(order["totalAmount"], json!(1748.0));
    let shirt_line = order["items"]
        .as_array()
        .expect("items")
        .iter()
        .find(|i| i["productId"] == json!(shirt_id))
        .expect("shirt line");
    assert_eq!(shirt_line["price"], json!(749.0));
    assert_eq!(shirt_line["productName"], json!("Oxford Shirt"));
    assert_eq!(shirt_line["size"], json!("M"));
}

#[actix_web::test]
async fn order_with_unknown_product_is_rejected() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let token = individual_token(&app, "badorder@example.com").await;

    let req = TestRequest::post()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "items": [{"productId": 424242, "quantity": 1}],
            "deliveryAddress": "4 Lake View, Pune",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // The rejected order left no rows behind.
    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .expect("count orders");
    assert_eq!(orders, 0);

    let req = TestRequest::post()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"items": [], "deliveryAddress": "4 Lake View, Pune"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn product_listing_searches_sorts_and_paginates() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    seed_product(&pool, "Oxford Shirt", 999.0).await;
    seed_product(&pool, "Linen Shirt", 499.0).await;
    seed_product(&pool, "Chino Trousers", 1299.0).await;

    let req = TestRequest::get()
        .uri("/api/products?search=shirt&sort=price_asc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalProducts"], json!(2));
    let products = body["data"]["products"].as_array().expect("products");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], json!("Linen Shirt"));
    assert_eq!(products[0]["sellingPrice"], json!(499.0));
    assert_eq!(products[1]["name"], json!("Oxford Shirt"));

    // Second page of one-per-page search results.
    let req = TestRequest::get()
        .uri("/api/products?search=shirt&sort=price_asc&page=2&limit=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalPages"], json!(2));
    assert_eq!(body["data"]["currentPage"], json!(2));
    let products = body["data"]["products"].as_array().expect("products");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], json!("Oxford Shirt"));

    // Unknown sort falls back to newest-first rather than erroring.
    let req = TestRequest::get()
        .uri("/api/products?sort=drop+table")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalProducts"], json!(3));
}

#[actix_web::test]
async fn inactive_products_are_hidden_from_the_catalog() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let product_id = seed_product(&pool, "Retired Jacket", 1999.0).await;
    sqlx::query("UPDATE products SET status = 'inactive' WHERE id = $1")
        .bind(product_id)
        .execute(&pool)
        .await
        .expect("deactivate");

    let req = TestRequest::get().uri("/api/products").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["totalProducts"], json!(0));

    // Direct lookup still resolves regardless of status.
    let req = TestRequest::get()
        .uri(&format!("/api/products/{product_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn cart_accumulates_per_product_and_size() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let product_id = seed_product(&pool, "Oxford Shirt", 749.0).await;
    let token = individual_token(&app, "cart@example.com").await;

    let add = |quantity: i64, size: &str| {
        TestRequest::post()
            .uri("/api/cart")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"productId": product_id, "quantity": quantity, "size": size}))
            .to_request()
    };

    let resp = test::call_service(&app, add(1, "M")).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let first_line_id = body["data"]["cartItemId"].as_i64().expect("cart item id");

    // Same product and size folds into the existing line.
    let resp = test::call_service(&app, add(2, "M")).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["cartItemId"], json!(first_line_id));

    // A different size opens a new line.
    let resp = test::call_service(&app, add(1, "L")).await;
    assert_eq!(resp.status(), 201);

    let req = TestRequest::get()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let lines = body["data"].as_array().expect("cart lines");
    assert_eq!(lines.len(), 2);
    let merged = lines
        .iter()
        .find(|l| l["size"] == json!("M"))
        .expect("merged line");
    assert_eq!(merged["quantity"], json!(3));
    assert_eq!(merged["productName"], json!("Oxford Shirt"));
    assert_eq!(merged["price"], json!(749.0));

    let req = TestRequest::put()
        .uri(&format!("/api/cart/{first_line_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"quantity": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let quantity: i32 = sqlx::query("SELECT quantity FROM cart_items WHERE id = $1")
        .bind(first_line_id as i32)
        .fetch_one(&pool)
        .await
        .expect("select quantity")
        .get("quantity");
    assert_eq!(quantity, 5);

    let req = TestRequest::delete()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
        .fetch_one(&pool)
        .await
        .expect("count cart");
    assert_eq!(remaining, 0);
}

#[actix_web::test]
async fn ids_and_quantities_beyond_i32_do_not_alias_small_values() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let shirt_id = seed_product(&pool, "Oxford Shirt", 749.0).await;
    let token = individual_token(&app, "wide-ids@example.com").await;

    // The low 32 bits of this id equal shirt_id; a truncating cast would
    // silently order the shirt.
    let aliased_id = (1i64 << 32) + i64::from(shirt_id);

    let req = TestRequest::post()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "items": [{"productId": aliased_id, "quantity": 1}],
            "deliveryAddress": "4 Lake View, Pune",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .expect("count orders");
    assert_eq!(orders, 0);

    let req = TestRequest::post()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"productId": aliased_id, "quantity": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Same trap on the quantity side: 2^32 + 3 must not become 3.
    let oversized_quantity = (1i64 << 32) + 3;

    let req = TestRequest::post()
        .uri("/api/individual/orders")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "items": [{"productId": shirt_id, "quantity": oversized_quantity}],
            "deliveryAddress": "4 Lake View, Pune",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = TestRequest::post()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"productId": shirt_id, "quantity": oversized_quantity}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let cart_lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
        .fetch_one(&pool)
        .await
        .expect("count cart");
    assert_eq!(cart_lines, 0);
}

#[actix_web::test]
async fn non_positive_quantities_are_rejected() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let product_id = seed_product(&pool, "Oxford Shirt", 749.0).await;
    let token = individual_token(&app, "zero-qty@example.com").await;

    for quantity in [0i64, -2] {
        let req = TestRequest::post()
            .uri("/api/individual/orders")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "items": [{"productId": product_id, "quantity": quantity}],
                "deliveryAddress": "4 Lake View, Pune",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = TestRequest::post()
            .uri("/api/cart")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({"productId": product_id, "quantity": quantity}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    let orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .expect("count orders");
    assert_eq!(orders, 0);

    // A valid line cannot be updated down to zero either.
    let req = TestRequest::post()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"productId": product_id, "quantity": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: Value = test::read_body_json(resp).await;
    let line_id = body["data"]["cartItemId"].as_i64().expect("line id");

    let req = TestRequest::put()
        .uri(&format!("/api/cart/{line_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"quantity": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let quantity: i32 = sqlx::query("SELECT quantity FROM cart_items WHERE id = $1")
        .bind(line_id as i32)
        .fetch_one(&pool)
        .await
        .expect("select quantity")
        .get("quantity");
    assert_eq!(quantity, 1);
}

#[actix_web::test]
async fn cart_rejects_unknown_products_and_foreign_lines() {
    let test_db = support::init_test_db().await;
    let pool = test_db.pool.clone();
    let state = web::Data::new(support::build_state(pool.clone()));
    let app = test::init_service(App::new().app_data(state.clone()).service(scopes())).await;

    let product_id = seed_product(&pool, "Oxford Shirt", 749.0).await;
    let first = individual_token(&app, "cart-a@example.com").await;
    let second = individual_token(&app, "cart-b@example.com").await;

    let req = TestRequest::post()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {first}")))
        .set_json(json!({"productId": 424242, "quantity": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = TestRequest::post()
        .uri("/api/cart")
        .insert_header(("Authorization", format!("Bearer {first}")))
        .set_json(json!({"productId": product_id, "quantity": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let line_id = body["data"]["cartItemId"].as_i64().expect("line id");

    // Another user's line is invisible to updates and deletes.
    let req = TestRequest::put()
        .uri(&format!("/api/cart/{line_id}"))
        .insert_header(("Authorization", format!("Bearer {second}")))
        .set_json(json!({"quantity": 9}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = TestRequest::delete()
        .uri(&format!("/api/cart/{line_id}"))
        .insert_header(("Authorization", format!("Bearer {second}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
