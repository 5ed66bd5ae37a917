use std::sync::Arc;

use chrono::NaiveDate;
use extrato_ingest::{
    EntriesLayoutParser, ParserConfig, StatementParser, TransactionKind, parse_statement_text,
};
use rust_decimal::Decimal;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config() -> ParserConfig {
    ParserConfig::default().with_today(ymd(2026, 10, 19))
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[test]
fn test_entries_section_end_to_end() {
    let text = "entries viewing period\n01/03 MARKET XYZ 120,50 D 1.000,00\n05/03 SALARY 3.000,00 C 4.000,00\n";
    let stmt = parse_statement_text(text, &config()).unwrap();

    assert_eq!(stmt.transactions.len(), 2);

    let market = &stmt.transactions[0];
    assert_eq!(market.date, ymd(2026, 3, 1));
    assert_eq!(market.description, "MARKET XYZ");
    assert_eq!(market.amount, money(-12050));
    assert_eq!(market.balance, Some(money(100000)));
    assert_eq!(market.kind, TransactionKind::Debit);

    let salary = &stmt.transactions[1];
    assert_eq!(salary.date, ymd(2026, 3, 5));
    assert_eq!(salary.description, "SALARY");
    assert_eq!(salary.amount, money(300000));
    assert_eq!(salary.balance, Some(money(400000)));
    assert_eq!(salary.kind, TransactionKind::Credit);

    assert_eq!(stmt.opening_balance, money(112050));
    assert_eq!(stmt.closing_balance, money(400000));
    assert_eq!(stmt.credit_limit, Decimal::ZERO);
    assert_eq!(stmt.available_limit, Decimal::ZERO);
}

#[test]
fn test_single_blob_extraction() {
    let text = "Lançamentos - período de visualização \
        01/03 PREVIOUS BALANCE 1.000,00 \
        02/03 MARKET 120,50 D 879,50 \
        03/03 SALARY 3.000,00 C 3.879,50 \
        Lançamentos futuros 10/03 RENT 900,00 D";
    let stmt = parse_statement_text(text, &config()).unwrap();

    assert_eq!(stmt.transactions.len(), 3);
    assert_eq!(stmt.transactions[0].kind, TransactionKind::Balance);
    assert!(stmt.transactions.iter().all(|t| t.description != "RENT"));

    assert_eq!(stmt.opening_balance, money(100000));
    assert_eq!(stmt.closing_balance, money(387950));

    let totals = stmt.totals();
    assert_eq!(totals.debits, money(-12050));
    assert_eq!(totals.credits, money(300000));
    assert_eq!(totals.entry_count, 2);
    assert_eq!(stmt.ledger_entries().count(), 2);
}

#[test]
fn test_closing_balance_is_opening_plus_amounts() {
    let text = "saldo anterior 1.000,00\n01/03 A 10,00 D\n02/03 B 20,00 C\n03/03 C 5,55-";
    let stmt = parse_statement_text(text, &config()).unwrap();

    assert_eq!(stmt.opening_balance, money(100000));
    let sum: Decimal = stmt.transactions.iter().map(|t| t.amount).sum();
    assert_eq!(stmt.closing_balance, stmt.opening_balance + sum);
    assert_eq!(stmt.closing_balance, money(100445));
    assert_eq!(stmt.transactions[0].balance, Some(money(99000)));
    assert_eq!(stmt.transactions[2].balance, Some(money(100445)));
}

#[test]
fn test_header_closing_balance_is_kept() {
    let text = "Current balance 2.000,00\n01/03 A 10,00 D\n02/03 B 20,00 C\n03/03 C 5,00 C";
    let stmt = parse_statement_text(text, &config()).unwrap();
    assert_eq!(stmt.closing_balance, money(200000));
    assert_eq!(stmt.opening_balance, Decimal::ZERO);
    assert_eq!(stmt.transactions[2].balance, Some(money(1500)));
}

#[test]
fn test_marker_and_sign_drive_kind() {
    let cases = [
        ("01/03 X 10,00 D 90,00", TransactionKind::Debit, -1000),
        ("01/03 X -10,00 C 90,00", TransactionKind::Credit, 1000),
        ("01/03 X 10,00- 90,00", TransactionKind::Debit, -1000),
        ("01/03 X 10,00 90,00", TransactionKind::Credit, 1000),
    ];
    for (line, kind, cents) in cases {
        let stmt = parse_statement_text(line, &config()).unwrap();
        assert_eq!(stmt.transactions.len(), 1, "{line}");
        let t = &stmt.transactions[0];
        assert_eq!(t.kind, kind, "{line}");
        assert_eq!(t.amount, money(cents), "{line}");
        assert_eq!(t.balance, Some(money(9000)), "{line}");
    }
}

#[test]
fn test_short_dates_take_the_period_end_year() {
    let text = "Statement period from 01/01/2025 to 31/01/2025\n\
        entries viewing period\n\
        28/01 GIFTS 50,00 D\n\
        05/01 SALARY 1.000,00 C\n\
        10/01 RENT 700,00 D\n";
    let stmt = parse_statement_text(text, &config()).unwrap();
    assert_eq!(stmt.statement_date, ymd(2025, 1, 31));
    assert_eq!(stmt.transactions[0].date, ymd(2025, 1, 5));
    assert_eq!(stmt.transactions[2].date, ymd(2025, 1, 28));
}

#[test]
fn test_short_dates_after_latest_full_date_keep_its_year() {
    let text = "02/01/2024 OPENING DEPOSIT 100,00 C\n20/02 MARKET 10,00 D\n15/03 RENT 50,00 D\n";
    let stmt = parse_statement_text(text, &config()).unwrap();

    let dates: Vec<_> = stmt.transactions.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![ymd(2024, 1, 2), ymd(2024, 2, 20), ymd(2024, 3, 15)]);
    assert_eq!(stmt.transactions[0].description, "OPENING DEPOSIT");
    assert_eq!(stmt.transactions[0].balance, Some(money(10000)));
    assert_eq!(stmt.transactions[1].balance, Some(money(9000)));
    assert_eq!(stmt.closing_balance, money(4000));
}

#[test]
fn test_huge_amounts_do_not_abort_the_parse() {
    let huge = "79.228.162.514.264.337.593.543.950.335,00";
    let text = format!("01/03 A {huge} C\n02/03 B {huge} C\n03/03 C 10,00 C\n");
    let stmt = parse_statement_text(&text, &config()).unwrap();

    assert_eq!(stmt.transactions.len(), 1);
    assert_eq!(stmt.transactions[0].description, "C");
    assert_eq!(stmt.closing_balance, money(1000));
}

#[test]
fn test_noise_lines_are_dropped() {
    let text = "entries viewing period\n\
        date description amount balance\n\
        01/03 MARKET 10,00 D 90,00\n\
        page 1 of 2\n\
        02/03 BAKERY 5,00 D 85,00\n";
    let stmt = parse_statement_text(text, &config().with_debug(true)).unwrap();
    assert_eq!(stmt.transactions.len(), 2);
}

#[test]
fn test_limits_from_header() {
    let text = "Credit limit 5.000,00\nAvailable limit 4.500,00\n01/03 CARD 500,00 D";
    let stmt = parse_statement_text(text, &config()).unwrap();
    assert_eq!(stmt.credit_limit, money(500000));
    assert_eq!(stmt.available_limit, money(450000));
}

#[test]
fn test_statement_serializes_for_storage() {
    let text = "entries viewing period\n01/03 MARKET XYZ 120,50 D 1.000,00\n";
    let stmt = parse_statement_text(text, &config()).unwrap();
    let json = serde_json::to_value(&stmt).unwrap();

    assert_eq!(json["transactions"][0]["kind"], "DEBIT");
    assert_eq!(json["transactions"][0]["amount"], "-120.50");
    assert_eq!(json["transactions"][0]["date"], "2026-03-01");
    assert_eq!(json["opening_balance"], "1120.50");
}

#[test]
fn test_parser_shared_across_threads() {
    let parser = Arc::new(EntriesLayoutParser::new(config()).unwrap());
    let handles: Vec<_> = (1..=4)
        .map(|day| {
            let parser = Arc::clone(&parser);
            std::thread::spawn(move || {
                let text = format!("0{day}/03 ROW 1,00 C");
                StatementParser::parse(parser.as_ref(), &text).transactions.len()
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), 1);
    }
}
