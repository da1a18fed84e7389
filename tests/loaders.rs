//! Loading catalogs and shopping lists from CSV files on disk.

use std::fs;

use testresult::TestResult;

use checkout::{
    loader::{load_deals_from_path, load_items_from_path, load_shopping_list_from_path},
    prelude::*,
    pricing::cents,
};

fn member_names(catalog: &Catalog, deal: DealId) -> Result<Vec<&str>, CatalogError> {
    catalog
        .get_deal(deal)?
        .members()
        .iter()
        .map(|id| catalog.get_item(*id).map(CatalogItem::name))
        .collect()
}

#[test]
fn loads_catalog_from_files() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = dir.path().join("items.csv");
    let deals = dir.path().join("deals.csv");

    fs::write(
        &items,
        "item,price\n  peanut butter , $4.50\njelly,3.5\nbread,2.50\nmilk,1.99\n",
    )?;
    fs::write(&deals, "items\nmilk,,\nbread,jelly,peanut butter\n")?;

    let mut catalog = Catalog::new();

    assert_eq!(load_items_from_path(&mut catalog, &items)?, 4);
    assert_eq!(load_deals_from_path(&mut catalog, &deals)?, 2);

    let peanut_butter = catalog.item_by_name("Peanut Butter")?;
    assert_eq!(peanut_butter.price(), &cents(450));

    let milk_deal = catalog.item_by_name("Milk")?.deal().ok_or("milk has no deal")?;
    assert_eq!(catalog.get_deal(milk_deal)?.kind(), DealKind::BuyTwoGetOneFree);

    assert_eq!(member_names(&catalog, milk_deal)?, ["Milk"]);

    let sandwich = peanut_butter.deal().ok_or("peanut butter has no deal")?;
    let deal = catalog.get_deal(sandwich)?;

    assert_eq!(deal.kind(), DealKind::CheapestOfThreeFree);
    assert_eq!(
        member_names(&catalog, sandwich)?,
        ["Peanut Butter", "Jelly", "Bread"]
    );
    assert_eq!(catalog.item_by_name("Jelly")?.deal(), Some(sandwich));
    assert_eq!(catalog.item_by_name("Bread")?.deal(), Some(sandwich));

    Ok(())
}

#[test]
fn reserved_item_name_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = dir.path().join("items.csv");

    fs::write(&items, "item,price\nsoda,1.00\ncheckout,2.00\n")?;

    let mut catalog = Catalog::new();
    let err = load_items_from_path(&mut catalog, &items)
        .err()
        .ok_or("expected an error")?;

    let message = err.to_string();
    assert!(message.contains("items.csv"), "{message}");
    assert!(message.contains("'Checkout' is reserved"), "{message}");

    Ok(())
}

#[test]
fn negative_price_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = dir.path().join("items.csv");

    fs::write(&items, "item,price\nsoda,-1.00\n")?;

    let mut catalog = Catalog::new();

    let result = load_items_from_path(&mut catalog, &items);

    assert!(
        matches!(
            &result,
            Err(LoadError::File { source, .. }) if matches!(
                **source,
                LoadError::InvalidPrice {
                    source: PriceError::Negative(_),
                    ..
                }
            )
        ),
        "expected a negative price inside a file error, got {result:?}"
    );

    Ok(())
}

#[test]
fn item_in_two_deals_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let items = dir.path().join("items.csv");
    let deals = dir.path().join("deals.csv");

    fs::write(&items, "item,price\nsoda,1.00\nchips,3.00\n")?;
    fs::write(&deals, "items\nsoda\nchips,soda\n")?;

    let mut catalog = Catalog::new();
    load_items_from_path(&mut catalog, &items)?;

    let err = load_deals_from_path(&mut catalog, &deals)
        .err()
        .ok_or("expected an error")?;

    assert!(err.to_string().contains("row 3"), "{err}");
    assert_eq!(catalog.deal_count(), 1);
    assert_eq!(catalog.item_by_name("Chips")?.deal(), None);

    Ok(())
}

#[test]
fn shopping_list_feeds_register() -> TestResult {
    let dir = tempfile::tempdir()?;
    let list = dir.path().join("list.csv");

    fs::write(&list, "item,quantity\nsoda,2\nSODA,1\nchips,1\n")?;

    let mut catalog = Catalog::new();
    catalog.add_item("Soda", cents(100))?;
    catalog.add_item("Chips", cents(300))?;
    catalog.add_deal(&["Soda"])?;

    let mut register = Register::new(&catalog);

    assert_eq!(load_shopping_list_from_path(&mut register, &list)?, 3);

    let receipt = register.checkout()?;

    assert_eq!(receipt.group_count(), 1);
    assert_eq!(receipt.total(), cents(500));
    assert_eq!(receipt.savings(), cents(100));

    Ok(())
}
