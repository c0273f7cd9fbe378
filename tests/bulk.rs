use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use terracotta_storefront::{
    bulk::{
        self, OrderAction, ProductAction, adjusted_stock, validate_ids, validate_order_status,
    },
    dto::bulk::{
        BulkData, OrderBulkOperation, OrderBulkRequest, ProductBulkOperation, ProductBulkRequest,
    },
    error::AppError,
};
use uuid::Uuid;

fn ids(n: usize) -> Vec<Uuid> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn product_request(operation: ProductBulkOperation, data: BulkData) -> ProductBulkRequest {
    ProductBulkRequest {
        operation,
        ids: ids(1),
        data,
    }
}

#[tokio::test]
async fn run_reports_every_id_once() {
    let ids = ids(7);
    let failing: Vec<Uuid> = vec![ids[1], ids[4]];
    let calls = Arc::new(AtomicUsize::new(0));

    let result = bulk::run("activate", &ids, |id| {
        let calls = calls.clone();
        let fail = failing.contains(&id);
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            if fail { Err(AppError::NotFound) } else { Ok(()) }
        }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 7);
    assert_eq!(result.operation, "activate");
    assert_eq!(result.requested, 7);
    assert_eq!(result.succeeded, 5);
    assert_eq!(result.failed, 2);
    assert_eq!(result.succeeded + result.failed, result.requested);
    let failed_ids: Vec<Uuid> = result.failures.iter().map(|f| f.id).collect();
    assert_eq!(failed_ids, failing);
    assert!(result.succeeded_ids.iter().all(|id| !failing.contains(id)));
}

#[tokio::test]
async fn run_over_no_ids_is_empty() {
    let result = bulk::run("delete", &[], |_| async { Ok::<(), AppError>(()) }).await;
    assert_eq!(result.requested, 0);
    assert_eq!(result.succeeded, 0);
    assert_eq!(result.failed, 0);
}

#[test]
fn id_list_must_be_non_empty_and_bounded() {
    assert!(matches!(validate_ids(&[], 10), Err(AppError::BadRequest(_))));
    assert!(matches!(validate_ids(&ids(11), 10), Err(AppError::BadRequest(_))));
    assert!(validate_ids(&ids(10), 10).is_ok());
}

#[test]
fn product_actions_require_their_data() {
    let missing_price = product_request(ProductBulkOperation::SetPrice, BulkData::default());
    assert!(matches!(missing_price.action(), Err(AppError::BadRequest(_))));

    let below_price = product_request(
        ProductBulkOperation::SetPrice,
        BulkData {
            price: Some(500),
            original_price: Some(400),
            ..Default::default()
        },
    );
    assert!(matches!(below_price.action(), Err(AppError::BadRequest(_))));

    let zero_delta = product_request(
        ProductBulkOperation::AdjustStock,
        BulkData {
            delta: Some(0),
            ..Default::default()
        },
    );
    assert!(matches!(zero_delta.action(), Err(AppError::BadRequest(_))));
}

#[test]
fn product_actions_are_built_from_data() {
    let price = product_request(
        ProductBulkOperation::SetPrice,
        BulkData {
            price: Some(450),
            original_price: Some(600),
            ..Default::default()
        },
    );
    assert_eq!(
        price.action().unwrap(),
        ProductAction::SetPrice {
            price: 450,
            original_price: Some(600)
        }
    );

    let tag = product_request(
        ProductBulkOperation::SetTag,
        BulkData {
            tag: Some(" Festive ".into()),
            ..Default::default()
        },
    );
    assert_eq!(tag.action().unwrap(), ProductAction::SetTag(Some("festive".into())));

    let clear_tag = product_request(ProductBulkOperation::SetTag, BulkData::default());
    assert_eq!(clear_tag.action().unwrap(), ProductAction::SetTag(None));

    let deactivate = product_request(ProductBulkOperation::Deactivate, BulkData::default());
    assert_eq!(deactivate.action().unwrap(), ProductAction::SetActive(false));
}

#[test]
fn order_actions_validate_status() {
    let request = |operation, status: Option<&str>| OrderBulkRequest {
        operation,
        ids: ids(2),
        data: BulkData {
            status: status.map(str::to_string),
            ..Default::default()
        },
    };

    assert_eq!(
        request(OrderBulkOperation::SetStatus, Some("shipped")).action().unwrap(),
        OrderAction::SetStatus("shipped".into())
    );
    assert_eq!(
        request(OrderBulkOperation::Cancel, None).action().unwrap(),
        OrderAction::SetStatus("cancelled".into())
    );
    assert!(request(OrderBulkOperation::SetStatus, Some("lost")).action().is_err());
    assert!(request(OrderBulkOperation::SetStatus, None).action().is_err());

    assert!(validate_order_status("completed").is_ok());
    assert!(validate_order_status("Completed").is_err());
}

#[test]
fn bulk_request_parses_snake_case_operation() {
    let json = serde_json::json!({
        "operation": "adjust_stock",
        "ids": [Uuid::new_v4()],
        "data": { "delta": -2 }
    });
    let request: ProductBulkRequest = serde_json::from_value(json).unwrap();
    assert_eq!(request.operation, ProductBulkOperation::AdjustStock);
    assert_eq!(request.action().unwrap(), ProductAction::AdjustStock(-2));

    let without_data = serde_json::json!({ "operation": "delete", "ids": [] });
    let request: ProductBulkRequest = serde_json::from_value(without_data).unwrap();
    assert_eq!(request.action().unwrap(), ProductAction::Delete);
}

#[test]
fn stock_adjustment_stays_in_range() {
    assert_eq!(adjusted_stock(5, -2).unwrap(), 3);
    assert_eq!(adjusted_stock(5, -5).unwrap(), 0);
    assert!(matches!(adjusted_stock(5, -6), Err(AppError::BadRequest(_))));
    assert!(matches!(
        adjusted_stock(i32::MAX, 1),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        adjusted_stock(0, i32::MIN),
        Err(AppError::BadRequest(_))
    ));
    assert_eq!(adjusted_stock(1, i32::MAX - 1).unwrap(), i32::MAX);
}
