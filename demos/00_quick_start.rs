/// quick start - originate a loan and make a payment
use loan_book_rs::{
    CreateLoanRequest, InstallmentTerm, LoanBook, LoanConfig, LoanFilter, Money, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let book = LoanBook::new(LoanConfig::standard(), time);

    // a customer with a 50,000 credit line
    let customer_id = book.register_customer("Ada", "Lovelace", Money::from_major(50_000));

    // 10,000 at 10% over 12 months -> 11,000 total, 916.67 per installment
    let loan = book.create_loan(CreateLoanRequest {
        customer_id,
        amount: Money::from_major(10_000),
        interest_rate: Rate::from_decimal(dec!(0.1)),
        term: InstallmentTerm::Twelve,
    })?;
    println!("loan {} for {}", loan.loan_id, loan.loan_amount);

    // pay the nearest installments
    let outcome = book.pay_loan(loan.loan_id, Money::from_major(2_000))?;
    println!(
        "paid {} installments, spent {}",
        outcome.installments_paid, outcome.total_spent
    );

    for summary in book.list_loans(customer_id, LoanFilter::default()) {
        println!(
            "{}/{} installments paid: {}",
            summary.paid_installment_count, summary.installment_count, summary.status
        );
    }

    Ok(())
}
