use chrono::NaiveDate;
use rusty_lending_ddd::{
    adapters::SystemClock,
    adapters::memory::{CatalogStore, MemberStore},
    application::lending::{
        self, ServiceDependencies, available_books, borrowing_history, calculate_fine,
        checkout_book, register_member, return_book,
    },
    domain::commands::*,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date")
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_lending_ddd=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n=== Library Book Checkout Demo ===\n");

    let deps = ServiceDependencies::new(
        Arc::new(CatalogStore::new()),
        Arc::new(MemberStore::new()),
        Arc::new(SystemClock),
    );

    // 1. 書籍の登録
    println!("Adding books...");
    for (isbn, title, author) in [
        ("111", "Clean Code", "Robert C. Martin"),
        ("222", "Design Patterns", "GoF"),
        ("333", "Effective Java", "Joshua Bloch"),
        ("444", "Refactoring", "Martin Fowler"),
    ] {
        lending::add_book(
            &deps,
            AddBook {
                isbn: isbn.into(),
                title: title.into(),
                author: author.into(),
            },
        )
        .await
        .expect("demo book registration");
    }

    // 2. 会員の登録
    println!("Registering members...");
    for (member_id, name) in [("M1", "Apurv"), ("M2", "Alex")] {
        register_member(
            &deps,
            RegisterMember {
                member_id: member_id.into(),
                name: name.into(),
            },
        )
        .await
        .expect("demo member registration");
    }

    // 3. 貸出可能書籍の一覧
    println!("\nAvailable books:");
    for book in available_books(&deps).await.expect("query") {
        println!("  {} | {}", book.isbn, book.title);
    }

    let checkout_day = date(2025, 1, 1);

    // 4. 3冊まで貸出成功
    println!("\nChecking out 3 books for M1...");
    for isbn in ["111", "222", "333"] {
        let record = checkout_book(
            &deps,
            CheckoutBook {
                member_id: "M1".into(),
                isbn: isbn.into(),
                checkout_date: Some(checkout_day),
            },
        )
        .await
        .expect("demo checkout");
        println!("  {} due {}", record.isbn, record.due_date);
    }

    // 5. ルール違反：4冊目の貸出
    println!("\nAttempting 4th checkout (should fail)...");
    let err = checkout_book(
        &deps,
        CheckoutBook {
            member_id: "M1".into(),
            isbn: "444".into(),
            checkout_date: Some(checkout_day),
        },
    )
    .await
    .expect_err("loan limit should block");
    println!("Expected violation: {}", err);

    // 6. ルール違反：貸出中の書籍
    println!("\nAttempting to checkout unavailable book (M2 -> 111)...");
    let err = checkout_book(
        &deps,
        CheckoutBook {
            member_id: "M2".into(),
            isbn: "111".into(),
            checkout_date: Some(checkout_day),
        },
    )
    .await
    .expect_err("unavailable book should block");
    println!("Expected violation: {}", err);

    // 7. 存在しない書籍・会員
    println!("\nAttempting to checkout non-existent book...");
    let err = checkout_book(
        &deps,
        CheckoutBook {
            member_id: "M1".into(),
            isbn: "999".into(),
            checkout_date: Some(checkout_day),
        },
    )
    .await
    .expect_err("missing book");
    println!("Expected error: {}", err);

    println!("\nAttempting checkout with invalid member...");
    let err = checkout_book(
        &deps,
        CheckoutBook {
            member_id: "M999".into(),
            isbn: "111".into(),
            checkout_date: Some(checkout_day),
        },
    )
    .await
    .expect_err("missing member");
    println!("Expected error: {}", err);

    // 8. 延滞返却と延滞料金
    println!("\nReturning book 111 late (overdue)...");
    return_book(
        &deps,
        ReturnBook {
            member_id: "M1".into(),
            isbn: "111".into(),
            return_date: Some(date(2025, 1, 25)),
        },
    )
    .await
    .expect("demo return");
    let balance = calculate_fine(&deps, "M1", Some(date(2025, 1, 25)))
        .await
        .expect("fine calculation");
    println!("Fine balance: {}", balance);

    // 9. $10を超える延滞料金で貸出ブロック
    println!("\nReturning book 222 very late to exceed $10 fine...");
    return_book(
        &deps,
        ReturnBook {
            member_id: "M1".into(),
            isbn: "222".into(),
            return_date: Some(date(2025, 2, 20)),
        },
    )
    .await
    .expect("demo return");
    let balance = calculate_fine(&deps, "M1", Some(date(2025, 2, 20)))
        .await
        .expect("fine calculation");
    println!("Fine balance: {}", balance);

    println!("\nAttempting checkout with fine over $10...");
    let err = checkout_book(
        &deps,
        CheckoutBook {
            member_id: "M1".into(),
            isbn: "444".into(),
            checkout_date: Some(date(2025, 2, 21)),
        },
    )
    .await
    .expect_err("fine threshold should block");
    println!("Expected violation: {}", err);

    // 10. 返却後の貸出可能書籍
    println!("\nAvailable books after returns:");
    for book in available_books(&deps).await.expect("query") {
        println!("  {} | {}", book.isbn, book.title);
    }

    // 11. 貸出履歴（スナップショットとしてJSON出力）
    println!("\nBorrowing history for M1:");
    let history = borrowing_history(&deps, "M1").await.expect("history query");
    println!(
        "{}",
        serde_json::to_string_pretty(&history).expect("history serializes")
    );

    println!("\n=== Demo Completed ===\n");
}
