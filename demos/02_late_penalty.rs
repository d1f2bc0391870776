/// late penalty - installments paid past their due date cost more
use loan_book_rs::chrono::{Duration, TimeZone, Utc};
use loan_book_rs::{
    CreateLoanRequest, Event, InstallmentTerm, LoanBook, LoanConfig, Money, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let time = SafeTimeProvider::new(TimeSource::Test(start));
    let book = LoanBook::new(LoanConfig::standard(), time.clone());

    let customer_id = book.register_customer("Margaret", "Hamilton", Money::from_major(10_000));
    let loan = book.create_loan(CreateLoanRequest {
        customer_id,
        amount: Money::from_major(1_200),
        interest_rate: Rate::from_decimal(dec!(0.2)),
        term: InstallmentTerm::Six,
    })?;
    book.take_events();

    // let the first due date slip by 20 days
    let control = time.test_control().expect("test clock");
    control.advance(Duration::days(51));

    let outcome = book.pay_loan(loan.loan_id, Money::from_major(300))?;
    for event in book.take_events() {
        if let Event::InstallmentPaid {
            nominal_amount,
            effective_amount,
            ..
        } = event
        {
            println!(
                "nominal {} charged at {} after the late penalty",
                nominal_amount, effective_amount
            );
        }
    }
    println!("total spent: {}", outcome.total_spent);

    Ok(())
}
