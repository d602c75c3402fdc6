//! End-to-end engine tests against an in-memory SQLite store.
//!
//! Every test builds a fresh migrated database, seeds fixtures through
//! the repositories, and drives the engine the way an API layer would.

use benta_core::{
    CreditStatus, Customer, Money, PaymentType, Principal, Product, Role, LOW_STOCK_THRESHOLD,
};
use benta_db::{Database, DbConfig};
use benta_engine::{
    Engine, EngineConfig, EngineError, OverpaymentPolicy, SaleLine, SaleRequest, StockPolicy,
};
use chrono::Utc;

async fn test_engine() -> Engine {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    Engine::new(db, EngineConfig::default())
}

async fn test_engine_with(config: EngineConfig) -> Engine {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    Engine::new(db, config)
}

fn owner() -> Principal {
    Principal::new("u-1", "aling-nena", Role::Owner)
}

fn admin() -> Principal {
    Principal::new("u-2", "admin", Role::Admin)
}

async fn seed_product(engine: &Engine, id: &str, price_cents: i64, stock: i64) {
    let product = Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        description: None,
        category: Some("Snacks".to_string()),
        price_cents,
        stock,
        created_at: Utc::now(),
    };
    engine
        .database()
        .products()
        .insert(&product)
        .await
        .expect("seed product");
}

async fn seed_customer(engine: &Engine, id: &str, name: &str) {
    let customer = Customer {
        id: id.to_string(),
        name: name.to_string(),
        contact_info: None,
        total_purchases_cents: 0,
        created_at: Utc::now(),
    };
    engine
        .database()
        .customers()
        .insert(&customer)
        .await
        .expect("seed customer");
}

async fn stock_of(engine: &Engine, id: &str) -> i64 {
    engine
        .database()
        .products()
        .get_by_id(id)
        .await
        .expect("read product")
        .expect("product exists")
        .stock
}

fn line(product_id: &str, quantity: i64, price_cents: i64) -> SaleLine {
    SaleLine {
        product_id: product_id.to_string(),
        quantity,
        price_at_sale_cents: price_cents,
    }
}

fn cash_request(items: Vec<SaleLine>, total_cents: i64) -> SaleRequest {
    SaleRequest {
        customer_id: None,
        items,
        total_cents,
        payment_type: PaymentType::Cash,
    }
}

// =============================================================================
// Sale recording
// =============================================================================

#[tokio::test]
async fn test_cash_sale_decrements_stock_and_snapshots_items() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1550, 10).await;

    let request = cash_request(vec![line("prod-1", 3, 1550)], 4650);
    let recorded = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect("sale records");

    assert_eq!(recorded.total_cents, 4650);
    assert_eq!(recorded.item_count, 1);
    assert_eq!(stock_of(&engine, "prod-1").await, 7);

    let sale = engine
        .database()
        .sales()
        .get_by_id(&recorded.sale_id)
        .await
        .expect("read sale")
        .expect("sale row exists");
    assert_eq!(sale.total_cents, 4650);
    assert_eq!(sale.payment_type, PaymentType::Cash);
    assert_eq!(sale.customer_id, None);

    let items = engine
        .database()
        .sales()
        .get_items(&recorded.sale_id)
        .await
        .expect("read items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].product_id, "prod-1");
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].price_at_sale_cents, 1550);

    // Cash sales create no credit entry.
    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&recorded.sale_id)
        .await
        .expect("read credit");
    assert!(credit.is_none());
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back_whole_cart() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 10).await;
    seed_product(&engine, "prod-2", 2000, 7).await;

    // First line fits, second asks for more than the shelf holds.
    let request = cash_request(
        vec![line("prod-1", 2, 1000), line("prod-2", 8, 2000)],
        18_000,
    );
    let err = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect_err("sale must fail");

    match err {
        EngineError::InsufficientStock {
            product_id,
            available,
            requested,
        } => {
            assert_eq!(product_id, "prod-2");
            assert_eq!(available, 7);
            assert_eq!(requested, 8);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    // Nothing stuck: not even the line that succeeded before the failure.
    assert_eq!(stock_of(&engine, "prod-1").await, 10);
    assert_eq!(stock_of(&engine, "prod-2").await, 7);
    let sales = engine.database().sales().list().await.expect("list sales");
    assert!(sales.is_empty());
    assert_eq!(engine.database().logs().count().await.expect("count"), 0);
}

#[tokio::test]
async fn test_unknown_product_mid_cart_rolls_back() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 10).await;

    let request = cash_request(
        vec![line("prod-1", 1, 1000), line("prod-ghost", 1, 500)],
        1500,
    );
    let err = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect_err("sale must fail");
    assert!(matches!(err, EngineError::ProductNotFound(id) if id == "prod-ghost"));

    assert_eq!(stock_of(&engine, "prod-1").await, 10);
    assert!(engine
        .database()
        .sales()
        .list()
        .await
        .expect("list sales")
        .is_empty());
}

#[tokio::test]
async fn test_unknown_customer_rejected_before_any_write() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 10).await;

    let request = SaleRequest {
        customer_id: Some("cust-ghost".to_string()),
        items: vec![line("prod-1", 1, 1000)],
        total_cents: 1000,
        payment_type: PaymentType::Cash,
    };
    let err = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect_err("sale must fail");
    assert!(matches!(err, EngineError::CustomerNotFound(id) if id == "cust-ghost"));

    assert_eq!(stock_of(&engine, "prod-1").await, 10);
}

#[tokio::test]
async fn test_invalid_quantity_rejected_before_any_write() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 10).await;

    let request = cash_request(vec![line("prod-1", 0, 1000)], 0);
    let err = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect_err("zero quantity must fail");
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(stock_of(&engine, "prod-1").await, 10);
}

#[tokio::test]
async fn test_empty_cart_records_sale_with_no_items() {
    let engine = test_engine().await;

    let recorded = engine
        .sales()
        .record(&owner(), &cash_request(vec![], 0))
        .await
        .expect("empty cart records");
    assert_eq!(recorded.item_count, 0);

    let items = engine
        .database()
        .sales()
        .get_items(&recorded.sale_id)
        .await
        .expect("read items");
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_price_snapshot_survives_product_price_change() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1599, 10).await;

    let recorded = engine
        .sales()
        .record(&owner(), &cash_request(vec![line("prod-1", 1, 1599)], 1599))
        .await
        .expect("sale records");

    let mut product = engine
        .database()
        .products()
        .get_by_id("prod-1")
        .await
        .expect("read product")
        .expect("exists");
    product.price_cents = 1899;
    engine
        .database()
        .products()
        .update(&product)
        .await
        .expect("reprice");

    let items = engine
        .database()
        .sales()
        .get_items(&recorded.sale_id)
        .await
        .expect("read items");
    assert_eq!(items[0].price_at_sale_cents, 1599);
}

#[tokio::test]
async fn test_permissive_policy_lets_stock_go_negative() {
    let config = EngineConfig::default().stock_policy(StockPolicy::Permissive);
    let engine = test_engine_with(config).await;
    seed_product(&engine, "prod-1", 1000, 2).await;

    engine
        .sales()
        .record(&owner(), &cash_request(vec![line("prod-1", 5, 1000)], 5000))
        .await
        .expect("permissive sale records");
    assert_eq!(stock_of(&engine, "prod-1").await, -3);
}

#[tokio::test]
async fn test_concurrent_sales_cannot_oversell() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 10).await;

    let a = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .sales()
                .record(&owner(), &cash_request(vec![line("prod-1", 6, 1000)], 6000))
                .await
        })
    };
    let b = {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .sales()
                .record(&owner(), &cash_request(vec![line("prod-1", 6, 1000)], 6000))
                .await
        })
    };

    let results = [a.await.expect("task a"), b.await.expect("task b")];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one of two oversized sales may win");
    assert_eq!(stock_of(&engine, "prod-1").await, 4);
}

// =============================================================================
// Credit sales & settlement
// =============================================================================

#[tokio::test]
async fn test_credit_sale_opens_unpaid_credit_and_grows_total_purchases() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 10_000, 5).await;
    seed_customer(&engine, "cust-1", "Mang Tomas").await;

    let request = SaleRequest {
        customer_id: Some("cust-1".to_string()),
        items: vec![line("prod-1", 1, 10_000)],
        total_cents: 10_000,
        payment_type: PaymentType::Credit,
    };
    let recorded = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect("credit sale records");

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&recorded.sale_id)
        .await
        .expect("read credit")
        .expect("credit row exists");
    assert_eq!(credit.amount_owed_cents, 10_000);
    assert_eq!(credit.amount_paid_cents, 0);
    assert_eq!(credit.status, CreditStatus::Unpaid);
    assert_eq!(credit.customer_id.as_deref(), Some("cust-1"));

    let customer = engine
        .database()
        .customers()
        .get_by_id("cust-1")
        .await
        .expect("read customer")
        .expect("exists");
    assert_eq!(customer.total_purchases_cents, 10_000);
}

#[tokio::test]
async fn test_cash_sale_leaves_total_purchases_untouched() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 2500, 5).await;
    seed_customer(&engine, "cust-1", "Mang Tomas").await;

    let request = SaleRequest {
        customer_id: Some("cust-1".to_string()),
        items: vec![line("prod-1", 1, 2500)],
        total_cents: 2500,
        payment_type: PaymentType::Cash,
    };
    engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect("cash sale records");

    let customer = engine
        .database()
        .customers()
        .get_by_id("cust-1")
        .await
        .expect("read customer")
        .expect("exists");
    assert_eq!(customer.total_purchases_cents, 0);
}

#[tokio::test]
async fn test_anonymous_credit_sale_is_allowed() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 3000, 5).await;

    let request = SaleRequest {
        customer_id: None,
        items: vec![line("prod-1", 1, 3000)],
        total_cents: 3000,
        payment_type: PaymentType::Credit,
    };
    let recorded = engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect("anonymous credit sale records");

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&recorded.sale_id)
        .await
        .expect("read credit")
        .expect("credit row exists");
    assert_eq!(credit.customer_id, None);
    assert_eq!(credit.amount_owed_cents, 3000);
}

async fn record_credit_sale(engine: &Engine, total_cents: i64) -> String {
    seed_product(engine, "prod-credit", total_cents, 50).await;
    seed_customer(engine, "cust-credit", "Aling Rosa").await;
    let request = SaleRequest {
        customer_id: Some("cust-credit".to_string()),
        items: vec![line("prod-credit", 1, total_cents)],
        total_cents,
        payment_type: PaymentType::Credit,
    };
    engine
        .sales()
        .record(&owner(), &request)
        .await
        .expect("credit sale records")
        .sale_id
}

#[tokio::test]
async fn test_partial_then_final_payment_settles_credit() {
    let engine = test_engine().await;
    let sale_id = record_credit_sale(&engine, 10_000).await;

    let outcome = engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(4000))
        .await
        .expect("partial payment applies");
    assert_eq!(outcome.remaining_cents, 6000);
    assert_eq!(outcome.status, CreditStatus::PartiallyPaid);

    let outcome = engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(6000))
        .await
        .expect("final payment applies");
    assert_eq!(outcome.remaining_cents, 0);
    assert_eq!(outcome.status, CreditStatus::Paid);

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&sale_id)
        .await
        .expect("read credit")
        .expect("exists");
    assert_eq!(credit.amount_paid_cents, 10_000);
    assert_eq!(credit.status, CreditStatus::Paid);
}

#[tokio::test]
async fn test_payment_lookup_is_keyed_by_sale_id_not_credit_id() {
    let engine = test_engine().await;
    let sale_id = record_credit_sale(&engine, 5000).await;

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&sale_id)
        .await
        .expect("read credit")
        .expect("exists");
    assert_ne!(credit.id, sale_id);

    // The credit row's own id is not a valid payment key.
    let err = engine
        .credits()
        .apply_payment(&owner(), &credit.id, Money::from_cents(1000))
        .await
        .expect_err("credit id must not resolve");
    assert!(matches!(err, EngineError::CreditNotFound(_)));
}

#[tokio::test]
async fn test_non_positive_payments_rejected() {
    let engine = test_engine().await;
    let sale_id = record_credit_sale(&engine, 5000).await;

    for amount in [0, -500] {
        let err = engine
            .credits()
            .apply_payment(&owner(), &sale_id, Money::from_cents(amount))
            .await
            .expect_err("non-positive payment must fail");
        assert!(matches!(err, EngineError::InvalidPaymentAmount { .. }));
    }

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&sale_id)
        .await
        .expect("read credit")
        .expect("exists");
    assert_eq!(credit.amount_paid_cents, 0);
}

#[tokio::test]
async fn test_overpayment_allowed_by_default() {
    let engine = test_engine().await;
    let sale_id = record_credit_sale(&engine, 10_000).await;

    let outcome = engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(12_000))
        .await
        .expect("overpayment applies under the default policy");
    assert_eq!(outcome.remaining_cents, -2000);
    assert_eq!(outcome.status, CreditStatus::Paid);
}

#[tokio::test]
async fn test_overpayment_rejected_under_reject_policy() {
    let config = EngineConfig::default().overpayment_policy(OverpaymentPolicy::Reject);
    let engine = test_engine_with(config).await;
    let sale_id = record_credit_sale(&engine, 10_000).await;

    let err = engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(12_000))
        .await
        .expect_err("overpayment must fail");
    assert!(matches!(err, EngineError::InvalidPaymentAmount { .. }));

    let credit = engine
        .database()
        .credits()
        .get_by_sale_id(&sale_id)
        .await
        .expect("read credit")
        .expect("exists");
    assert_eq!(credit.amount_paid_cents, 0);
    assert_eq!(credit.status, CreditStatus::Unpaid);

    // An exact payoff still goes through.
    let outcome = engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(10_000))
        .await
        .expect("exact payoff applies");
    assert_eq!(outcome.remaining_cents, 0);
    assert_eq!(outcome.status, CreditStatus::Paid);
}

#[tokio::test]
async fn test_payment_on_cash_sale_is_credit_not_found() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 5).await;

    let recorded = engine
        .sales()
        .record(&owner(), &cash_request(vec![line("prod-1", 1, 1000)], 1000))
        .await
        .expect("cash sale records");

    let err = engine
        .credits()
        .apply_payment(&owner(), &recorded.sale_id, Money::from_cents(500))
        .await
        .expect_err("cash sale has no credit");
    assert!(matches!(err, EngineError::CreditNotFound(_)));
}

// =============================================================================
// Reports & audit trail
// =============================================================================

#[tokio::test]
async fn test_daily_report_sums_todays_sales() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-1", 1000, 50).await;

    engine
        .sales()
        .record(&owner(), &cash_request(vec![line("prod-1", 5, 1000)], 5000))
        .await
        .expect("first sale");
    engine
        .sales()
        .record(&owner(), &cash_request(vec![line("prod-1", 2, 1000)], 2500))
        .await
        .expect("second sale");

    let buckets = engine
        .reports()
        .aggregate(&owner(), "daily")
        .await
        .expect("daily report");
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].total_cents, 7500);
    assert_eq!(buckets[0].label, Utc::now().format("%Y-%m-%d").to_string());
}

#[tokio::test]
async fn test_unknown_report_period_yields_empty_report() {
    let engine = test_engine().await;
    let buckets = engine
        .reports()
        .aggregate(&owner(), "fortnightly")
        .await
        .expect("unknown period is not an error");
    assert!(buckets.is_empty());
}

#[tokio::test]
async fn test_audit_log_records_sales_and_payments() {
    let engine = test_engine().await;
    let sale_id = record_credit_sale(&engine, 5000).await;
    engine
        .credits()
        .apply_payment(&owner(), &sale_id, Money::from_cents(5000))
        .await
        .expect("payment applies");

    let entries = engine
        .audit()
        .list(&admin())
        .await
        .expect("admin reads the trail");
    assert_eq!(entries.len(), 2);
    // Newest first.
    assert!(entries[0].event.starts_with("Payment"));
    assert!(entries[1].event.starts_with("Sale"));
}

#[tokio::test]
async fn test_audit_trail_denied_to_owner_role() {
    let engine = test_engine().await;

    let err = engine
        .audit()
        .list(&owner())
        .await
        .expect_err("owner lacks the audit capability");
    assert!(matches!(err, EngineError::Unauthorized { role: Role::Owner }));
}

#[tokio::test]
async fn test_low_stock_listing_respects_threshold() {
    let engine = test_engine().await;
    seed_product(&engine, "prod-low", 1000, 5).await;
    seed_product(&engine, "prod-full", 1000, 50).await;

    let running_low = engine
        .database()
        .products()
        .low_stock(LOW_STOCK_THRESHOLD)
        .await
        .expect("low stock listing");
    assert_eq!(running_low.len(), 1);
    assert_eq!(running_low[0].id, "prod-low");
    assert!(running_low[0].is_low_stock());
}

#[tokio::test]
async fn test_credit_summaries_join_customer_and_sale_context() {
    let engine = test_engine().await;
    let named_sale = record_credit_sale(&engine, 8000).await;
    engine
        .credits()
        .apply_payment(&owner(), &named_sale, Money::from_cents(3000))
        .await
        .expect("partial payment applies");

    seed_product(&engine, "prod-anon", 2000, 5).await;
    let anon_sale = engine
        .sales()
        .record(
            &owner(),
            &SaleRequest {
                customer_id: None,
                items: vec![line("prod-anon", 1, 2000)],
                total_cents: 2000,
                payment_type: PaymentType::Credit,
            },
        )
        .await
        .expect("anonymous credit sale records")
        .sale_id;

    let summaries = engine
        .database()
        .credits()
        .list_summaries()
        .await
        .expect("list summaries");
    assert_eq!(summaries.len(), 2);

    let named = summaries
        .iter()
        .find(|s| s.sale_id == named_sale)
        .expect("named credit summarized");
    assert_eq!(named.customer_name.as_deref(), Some("Aling Rosa"));
    assert_eq!(named.amount_owed_cents, 8000);
    assert_eq!(named.amount_paid_cents, 3000);
    assert_eq!(named.status, CreditStatus::PartiallyPaid);
    assert_eq!(named.sale_total_cents, 8000);
    assert_eq!(named.remaining(), Money::from_cents(5000));

    let anon = summaries
        .iter()
        .find(|s| s.sale_id == anon_sale)
        .expect("anonymous credit summarized");
    assert_eq!(anon.customer_name, None);
    assert_eq!(anon.status, CreditStatus::Unpaid);
}
