/// early payoff - drive the clock and watch the per-day discount
use loan_book_rs::chrono::{Duration, TimeZone, Utc};
use loan_book_rs::{
    CreateLoanRequest, InstallmentTerm, LoanBook, LoanConfig, Money, Rate, SafeTimeProvider,
    TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let book = LoanBook::new(LoanConfig::standard(), time.clone());

    let customer_id = book.register_customer("Grace", "Hopper", Money::from_major(10_000));
    let loan = book.create_loan(CreateLoanRequest {
        customer_id,
        amount: Money::from_major(1_000),
        interest_rate: Rate::from_decimal(dec!(0.1)),
        term: InstallmentTerm::Six,
    })?;

    // the first three due dates fall inside the 3-month window; each is paid
    // below its nominal amount thanks to the early-payment discount
    let first = book.pay_loan(loan.loan_id, Money::from_major(1_000))?;
    println!(
        "paid {} installments early for {}",
        first.installments_paid, first.total_spent
    );

    // jump past the window and settle the rest
    let control = time.test_control().expect("test clock");
    control.advance(Duration::days(92));

    let second = book.pay_loan(loan.loan_id, Money::from_major(1_000))?;
    println!(
        "paid {} more for {}, fully paid: {}",
        second.installments_paid, second.total_spent, second.loan_fully_paid
    );

    let customer = book.customer(customer_id)?;
    println!(
        "collected {} against a {} loan; used credit back to {}",
        first.total_spent + second.total_spent,
        loan.loan_amount,
        customer.used_credit_limit
    );

    Ok(())
}
