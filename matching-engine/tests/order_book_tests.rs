use common::model::order::{Order, Side};
use matching_engine::{BookSide, OrderBook};
use rust_decimal_macros::dec;

fn order(side: Side, price: &str, quantity: &str) -> Order {
    Order::new(side, price.parse().unwrap(), quantity.parse().unwrap())
}

#[test]
fn test_empty_side_peeks_none() {
    let side = BookSide::new(Side::Buy);
    assert!(side.is_empty());
    assert!(side.peek_best().is_none());
    assert!(side.best_price().is_none());
}

#[test]
fn test_buy_side_prefers_highest_price() {
    let mut side = BookSide::new(Side::Buy);
    let low = order(Side::Buy, "9.98", "100");
    let high = order(Side::Buy, "10.00", "100");
    let mid = order(Side::Buy, "9.99", "100");

    side.insert(&low);
    side.insert(&high);
    side.insert(&mid);

    assert_eq!(side.best_price(), Some(dec!(10.00)));
    assert_eq!(side.peek_best(), Some(high.id));
}

#[test]
fn test_sell_side_prefers_lowest_price() {
    let mut side = BookSide::new(Side::Sell);
    let high = order(Side::Sell, "10.02", "100");
    let low = order(Side::Sell, "10.00", "100");
    let mid = order(Side::Sell, "10.01", "100");

    side.insert(&high);
    side.insert(&low);
    side.insert(&mid);

    assert_eq!(side.best_price(), Some(dec!(10.00)));
    assert_eq!(side.peek_best(), Some(low.id));
}

#[test]
fn test_fifo_within_price_level() {
    let mut side = BookSide::new(Side::Sell);
    let first = order(Side::Sell, "10.00", "100");
    let second = order(Side::Sell, "10.00", "100");
    let third = order(Side::Sell, "10.00", "100");

    side.insert(&first);
    side.insert(&second);
    side.insert(&third);

    assert_eq!(side.pop_best(), Some(first.id));
    assert_eq!(side.pop_best(), Some(second.id));
    assert_eq!(side.pop_best(), Some(third.id));
    assert_eq!(side.pop_best(), None);
    assert!(side.is_empty());
}

#[test]
fn test_peek_does_not_remove() {
    let mut side = BookSide::new(Side::Buy);
    let resting = order(Side::Buy, "9.99", "100");
    side.insert(&resting);

    assert_eq!(side.peek_best(), Some(resting.id));
    assert_eq!(side.peek_best(), Some(resting.id));
    assert!(!side.is_empty());
}

#[test]
fn test_remove_if_filled_evicts_only_filled_orders() {
    let mut side = BookSide::new(Side::Sell);
    let mut resting = order(Side::Sell, "10.00", "100");
    side.insert(&resting);

    // Partial fill: the order keeps its slot
    resting.fill(dec!(40));
    assert!(!side.remove_if_filled(&resting));
    assert_eq!(side.peek_best(), Some(resting.id));

    // Full fill: the order is evicted and the empty level cleaned up
    resting.fill(dec!(60));
    assert!(side.remove_if_filled(&resting));
    assert!(side.is_empty());
}

#[test]
fn test_book_fill_best_mutates_in_place() {
    let mut book = OrderBook::new();
    let ask = order(Side::Sell, "10.00", "100");
    let ask_id = ask.id;
    book.add_order(ask);

    let snapshot = book.fill_best(Side::Sell, dec!(30)).unwrap();
    assert_eq!(snapshot.id, ask_id);
    assert_eq!(snapshot.remaining_quantity, dec!(70));
    assert_eq!(book.get_order(ask_id).unwrap().remaining_quantity, dec!(70));
    assert_eq!(book.last_price(), Some(dec!(10.00)));

    let snapshot = book.fill_best(Side::Sell, dec!(70)).unwrap();
    assert!(snapshot.is_filled());
    assert!(book.get_order(ask_id).is_none());
    assert!(book.is_empty());
}

#[test]
fn test_fill_best_on_empty_side_is_an_error() {
    let mut book = OrderBook::new();
    assert!(book.fill_best(Side::Buy, dec!(1)).is_err());
}

#[test]
fn test_spread_and_levels() {
    let mut book = OrderBook::new();
    book.add_order(order(Side::Buy, "9.99", "100"));
    book.add_order(order(Side::Buy, "9.99", "150"));
    book.add_order(order(Side::Buy, "9.97", "200"));
    book.add_order(order(Side::Sell, "10.01", "300"));

    assert_eq!(book.spread(), Some(dec!(0.02)));
    assert_eq!(
        book.bid_levels(10),
        vec![(dec!(9.99), dec!(250)), (dec!(9.97), dec!(200))]
    );
    assert_eq!(book.ask_levels(10), vec![(dec!(10.01), dec!(300))]);
    assert_eq!(book.bid_levels(1).len(), 1);
    assert_eq!(book.len(), 4);
}
