use chrono::NaiveDate;
use moneybook::book::{Account, AccountBook, Category, Period, PeriodUnit, Transaction};
use moneybook::errors::BookError;
use moneybook::money::Money;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn duplicate_account_names_are_rejected() {
    let mut book = AccountBook::new("Guards");
    book.add_account(Account::new("Checking")).expect("first add");

    let err = book
        .add_account(Account::new("Checking"))
        .expect_err("duplicate fails");
    assert!(
        matches!(err, BookError::DuplicateAccount(ref name) if name == "Checking"),
        "unexpected error: {err:?}"
    );
    assert_eq!(book.accounts().len(), 1);

    // Matching is case-sensitive: a differently-cased name is a new account.
    book.add_account(Account::new("checking"))
        .expect("case-sensitive add succeeds");
    assert_eq!(book.accounts().len(), 2);
}

#[test]
fn batch_adds_reject_the_whole_batch_on_any_duplicate() {
    let mut book = AccountBook::new("Guards");
    book.add_account(Account::new("Checking")).expect("seed");

    let err = book
        .add_accounts(vec![Account::new("Savings"), Account::new("Checking")])
        .expect_err("existing name in batch");
    assert!(matches!(err, BookError::DuplicateAccount(_)));
    assert_eq!(book.accounts().len(), 1, "nothing from the batch was added");

    let err = book
        .add_accounts(vec![Account::new("Cash"), Account::new("Cash")])
        .expect_err("duplicate within batch");
    assert!(matches!(err, BookError::DuplicateAccount(ref name) if name == "Cash"));
    assert_eq!(book.accounts().len(), 1);

    book.add_accounts(vec![Account::new("Savings"), Account::new("Cash")])
        .expect("clean batch succeeds");
    assert_eq!(book.accounts().len(), 3);
}

#[test]
fn removals_demand_existing_targets() {
    let mut book = AccountBook::new("Guards");
    let checking = book.add_account(Account::new("Checking")).expect("add");

    let err = book
        .remove_account_at(5)
        .expect_err("index out of range");
    assert!(
        matches!(err, BookError::AccountNotFound(_)),
        "unexpected error: {err:?}"
    );

    let removed = book.remove_account(checking).expect("removal succeeds");
    assert_eq!(removed.name, "Checking");
    let err = book
        .remove_account(checking)
        .expect_err("second removal fails");
    assert!(matches!(err, BookError::AccountNotFound(_)));

    let err = book
        .remove_category_at(0)
        .expect_err("no categories exist");
    assert!(matches!(err, BookError::CategoryNotFound(_)));
}

#[test]
fn duplicate_category_names_are_rejected() {
    let mut book = AccountBook::new("Guards");
    book.add_category(Category::new("Groceries")).expect("first add");

    let err = book
        .add_category(Category::new("Groceries"))
        .expect_err("duplicate fails");
    assert!(
        matches!(err, BookError::DuplicateCategory(ref name) if name == "Groceries"),
        "unexpected error: {err:?}"
    );
    assert_eq!(book.categories().len(), 1);
}

#[test]
fn removing_a_category_detaches_its_transactions() {
    let mut book = AccountBook::new("Guards");
    let account = book.add_account(Account::new("Checking")).expect("account");
    let groceries = book.add_category(Category::new("Groceries")).expect("category");
    let utilities = book.add_category(Category::new("Utilities")).expect("category");

    let first = book
        .add_transaction(
            account,
            Transaction::new(date(2024, 1, 3), Money::from(-20), "Store", "")
                .with_category(groceries),
        )
        .expect("posts");
    let second = book
        .add_transaction(
            account,
            Transaction::new(date(2024, 1, 7), Money::from(-12), "Market", "")
                .with_category(groceries),
        )
        .expect("posts");
    book.add_transaction(
        account,
        Transaction::new(date(2024, 1, 9), Money::from(-60), "Power", "")
            .with_category(utilities),
    )
    .expect("posts");

    book.remove_category(groceries).expect("removal succeeds");

    for id in [first, second] {
        let txn = book
            .account(account)
            .and_then(|acct| acct.transaction(id))
            .expect("transaction survives");
        assert_eq!(txn.category_id, None);
    }

    // The detached transactions now land in the uncategorized bucket.
    let chunk = book.generate_report_chunk(date(2024, 1, 1), Period::new(1, PeriodUnit::Month));
    assert_eq!(chunk.categories.len(), 2, "Utilities plus uncategorized");
    let bucket = chunk.categories.last().expect("bucket");
    assert!(bucket.is_uncategorized());
    assert_eq!(bucket.balance_info.balance, Money::from(-32));
    assert_eq!(chunk.categories[0].balance_info.balance, Money::from(-60));
}

#[test]
fn remove_category_at_follows_stored_order() {
    let mut book = AccountBook::new("Guards");
    book.add_categories(vec![Category::new("A"), Category::new("B")])
        .expect("categories");

    let removed = book.remove_category_at(1).expect("index removal");
    assert_eq!(removed.name, "B");
    let err = book.remove_category_at(1).expect_err("now out of range");
    assert!(matches!(err, BookError::CategoryNotFound(_)));
}
