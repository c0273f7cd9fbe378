use terracotta_storefront::store::{
    Cart, CartItem, CartRegistry, StoreError, ToastLevel, Wishlist, WishlistItem,
    WishlistRegistry,
};
use uuid::Uuid;

fn item(price: i64, original_price: Option<i64>, quantity: i32) -> CartItem {
    CartItem {
        id: Uuid::new_v4(),
        name: "Classic Round Planter".into(),
        price,
        original_price,
        image: None,
        in_stock: true,
        max_quantity: 10,
        quantity,
    }
}

#[test]
fn cart_totals_follow_quantity_changes() {
    let mut cart = Cart::new();
    assert_eq!(cart.total_amount(), 0);

    let a = item(500, Some(700), 1);
    let id = a.id;
    cart.add(a).unwrap();
    assert_eq!(cart.total_amount(), 500);
    assert_eq!(cart.total_savings(), 200);

    cart.update_quantity(id, 3).unwrap();
    assert_eq!(cart.total_amount(), 1500);
    assert_eq!(cart.total_savings(), 600);
    assert_eq!(cart.item_count(), 3);

    cart.remove(id).unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.total_amount(), 0);
    assert_eq!(cart.total_savings(), 0);
}

#[test]
fn adding_same_product_twice_keeps_one_line() {
    let mut cart = Cart::new();
    let a = item(300, None, 2);
    let again = CartItem {
        quantity: 1,
        ..a.clone()
    };
    cart.add(a.clone()).unwrap();
    let line = cart.add(again).unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(line.quantity, 3);
    assert_eq!(cart.get(a.id).map(|l| l.quantity), Some(3));
}

#[test]
fn quantity_is_clamped_to_line_maximum() {
    let mut cart = Cart::new();
    let mut a = item(100, None, 8);
    a.max_quantity = 5;
    let id = a.id;

    let line = cart.add(a).unwrap();
    assert_eq!(line.quantity, 5);

    let err = cart.update_quantity(id, 6).unwrap_err();
    assert_eq!(
        err,
        StoreError::QuantityAboveMaximum {
            requested: 6,
            max: 5
        }
    );
    assert_eq!(cart.get(id).map(|l| l.quantity), Some(5));
}

#[test]
fn huge_add_on_existing_line_stays_within_bounds() {
    let mut cart = Cart::new();
    let a = item(500, Some(700), 1);
    let id = a.id;
    cart.add(a.clone()).unwrap();

    let line = cart
        .add(CartItem {
            quantity: i32::MAX,
            ..a
        })
        .unwrap();
    assert_eq!(line.quantity, 10);
    assert_eq!(cart.item_count(), 10);
    assert_eq!(cart.total_amount(), 5000);
    assert_eq!(cart.total_savings(), 2000);
    assert_eq!(cart.get(id).map(|l| l.quantity), Some(10));
}

#[test]
fn extreme_quantity_updates_are_rejected() {
    let mut cart = Cart::new();
    let a = item(100, None, 2);
    let id = a.id;
    cart.add(a).unwrap();

    assert_eq!(
        cart.update_quantity(id, i32::MAX),
        Err(StoreError::QuantityAboveMaximum {
            requested: i32::MAX,
            max: 10
        })
    );
    assert_eq!(
        cart.update_quantity(id, i32::MIN),
        Err(StoreError::QuantityBelowMinimum)
    );
    assert_eq!(cart.get(id).map(|l| l.quantity), Some(2));
}

#[test]
fn increment_at_the_largest_quantity_does_not_wrap() {
    let mut cart = Cart::new();
    let mut a = item(1, None, i32::MAX);
    a.max_quantity = i32::MAX;
    let id = a.id;
    cart.add(a).unwrap();

    assert_eq!(cart.increment(id).unwrap().quantity, i32::MAX);
    assert_eq!(cart.total_amount(), i64::from(i32::MAX));
}

#[test]
fn decrement_never_goes_below_one() {
    let mut cart = Cart::new();
    let a = item(100, None, 2);
    let id = a.id;
    cart.add(a).unwrap();

    assert_eq!(cart.decrement(id).unwrap().quantity, 1);
    assert_eq!(cart.decrement(id), Err(StoreError::QuantityBelowMinimum));
    assert_eq!(cart.get(id).map(|l| l.quantity), Some(1));
    assert_eq!(cart.increment(id).unwrap().quantity, 2);
}

#[test]
fn out_of_stock_and_zero_quantity_are_rejected() {
    let mut cart = Cart::new();
    let mut sold_out = item(100, None, 1);
    sold_out.in_stock = false;
    assert!(matches!(cart.add(sold_out), Err(StoreError::OutOfStock(_))));

    assert_eq!(
        cart.add(item(100, None, 0)),
        Err(StoreError::QuantityBelowMinimum)
    );
    assert!(cart.is_empty());
}

#[test]
fn removing_unknown_line_reports_not_found() {
    let mut cart = Cart::new();
    let id = Uuid::new_v4();
    assert_eq!(cart.remove(id), Err(StoreError::NotFound(id)));
}

#[test]
fn clear_returns_removed_lines() {
    let mut cart = Cart::new();
    cart.add(item(100, None, 1)).unwrap();
    cart.add(item(200, None, 1)).unwrap();

    let removed = cart.clear();
    assert_eq!(removed.len(), 2);
    assert!(cart.is_empty());
}

fn wish(name: &str) -> WishlistItem {
    WishlistItem {
        id: Uuid::new_v4(),
        name: name.into(),
        price: 899,
        image: None,
        slug: "warli-painted-vase".into(),
    }
}

#[test]
fn wishlist_holds_each_product_once() {
    let mut wishlist = Wishlist::new();
    let vase = wish("Warli Painted Vase");
    assert!(wishlist.add(vase.clone()));
    assert!(!wishlist.add(WishlistItem {
        price: 799,
        ..vase.clone()
    }));

    assert_eq!(wishlist.len(), 1);
    assert_eq!(wishlist.get(vase.id).map(|w| w.price), Some(799));
    assert!(wishlist.contains(vase.id));

    wishlist.remove(vase.id).unwrap();
    assert!(wishlist.is_empty());
    assert_eq!(
        wishlist.remove(vase.id),
        Err(StoreError::NotFound(vase.id))
    );
}

#[tokio::test]
async fn registry_keeps_one_store_per_user() {
    let registry = CartRegistry::new(16);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let first = registry.get(alice).await;
    first
        .update(|cart| {
            cart.add(item(500, Some(700), 1))?;
            Ok(((), "added".to_string()))
        })
        .await
        .unwrap();

    let again = registry.get(alice).await;
    assert_eq!(again.owner(), alice);
    assert_eq!(again.read(|cart| cart.total_amount()).await, 500);

    let other = registry.get(bob).await;
    assert!(other.read(|cart| cart.is_empty()).await);
    assert_eq!(registry.len().await, 2);
}

#[tokio::test]
async fn registry_drops_only_idle_stores() {
    let registry = CartRegistry::new(16);
    let owner = Uuid::new_v4();

    assert!(registry.find(owner).await.is_none());
    assert!(registry.is_empty().await);

    let store = registry.get(owner).await;
    store
        .update(|cart| {
            cart.add(item(100, None, 1))?;
            Ok(((), "added".to_string()))
        })
        .await
        .unwrap();

    // Held handle keeps the store alive.
    assert!(!registry.release(owner, Cart::is_empty).await);
    drop(store);

    // Items keep it alive too.
    assert!(!registry.release(owner, Cart::is_empty).await);
    assert_eq!(registry.len().await, 1);

    let store = registry.get(owner).await;
    store
        .update(|cart| {
            cart.clear();
            Ok(((), "cleared".to_string()))
        })
        .await
        .unwrap();
    drop(store);

    assert!(registry.release(owner, Cart::is_empty).await);
    assert!(registry.is_empty().await);
    assert!(registry.find(owner).await.is_none());
}

#[tokio::test]
async fn store_publishes_a_toast_per_outcome() {
    let registry = WishlistRegistry::new(16);
    let mut events = registry.subscribe();
    let owner = Uuid::new_v4();
    let store = registry.get(owner).await;

    let vase = wish("Warli Painted Vase");
    let (_, toast) = store
        .update(|wishlist| {
            wishlist.add(vase.clone());
            Ok(((), "Warli Painted Vase added to wishlist".to_string()))
        })
        .await
        .unwrap();
    assert_eq!(toast.level, ToastLevel::Success);

    let missing = Uuid::new_v4();
    let err = store
        .update(|wishlist| {
            wishlist.remove(missing)?;
            Ok(((), "removed".to_string()))
        })
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound(missing));

    let first = events.recv().await.unwrap();
    assert_eq!(first.owner, owner);
    assert_eq!(first.toast.level, ToastLevel::Success);
    assert_eq!(first.toast.message, "Warli Painted Vase added to wishlist");

    let second = events.recv().await.unwrap();
    assert_eq!(second.toast.level, ToastLevel::Error);

    // A rejected mutation leaves the state untouched.
    assert_eq!(store.snapshot().await.len(), 1);
}

#[test]
fn cart_item_serializes_camel_case() {
    let json = serde_json::to_value(item(500, Some(700), 1)).unwrap();
    assert_eq!(json["originalPrice"], 700);
    assert_eq!(json["inStock"], true);
    assert_eq!(json["maxQuantity"], 10);
}
