use rust_decimal::Decimal;
use storefront::domain::value_objects::{Price, SHIPPING_FLAT};
use storefront::local_storage::{FileStorage, KeyValueStore, MemoryStorage, CART_KEY};
use storefront::{Cart, CartEntry};

enum Op { Add(&'static str), Remove(&'static str), Set(&'static str, i64) }

fn entry(id: &str) -> CartEntry {
    let price = match id { "A" => "19.99", "B" => "0.10", _ => "2499.99" };
    CartEntry { product_id: id.into(), name: id.into(), price: Price::new(price), image_url: String::new() }
}

#[test]
fn test_derived_values_track_every_mutation() {
    let ops = [
        Op::Add("A"), Op::Add("B"), Op::Add("A"), Op::Set("B", 7), Op::Add("C"), Op::Remove("A"),
        Op::Set("C", 3), Op::Set("B", 0), Op::Add("B"), Op::Set("Z", 4), Op::Remove("missing"), Op::Add("A"),
    ];
    let mut cart = Cart::load(MemoryStorage::new());
    for op in ops {
        match op {
            Op::Add(id) => cart.add(entry(id)).unwrap(),
            Op::Remove(id) => cart.remove(id).unwrap(),
            Op::Set(id, n) => cart.set_quantity(id, n).unwrap(),
        }
        let count: u32 = cart.items().iter().map(|i| i.quantity).sum();
        let subtotal: Decimal = cart.items().iter().map(|i| i.price.amount() * Decimal::from(i.quantity)).sum();
        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.subtotal().round_dp(2), subtotal.round_dp(2));
        assert_eq!(cart.total(), cart.subtotal() + SHIPPING_FLAT);
        assert!(cart.items().iter().all(|i| i.quantity >= 1));
    }
    assert_eq!(cart.item_count(), 5);
    assert_eq!(cart.subtotal(), Decimal::new(752006, 2));
}

#[test]
fn test_cart_survives_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cart = Cart::load(FileStorage::open(dir.path()).unwrap());
        cart.add(entry("A")).unwrap();
        cart.add(entry("A")).unwrap();
        cart.add(entry("B")).unwrap();
    }
    let cart = Cart::load(FileStorage::open(dir.path()).unwrap());
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Decimal::new(4008, 2));
    assert!(cart.storage().get(CART_KEY).unwrap().unwrap().contains("\"productId\":\"A\""));
}
