pub mod user_repo;
pub use user_repo::UserRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod transaction_repo;
pub use transaction_repo::TransactionRepository;
pub mod card_repo;
pub use card_repo::CardRepository;
pub mod installment_repo;
pub use installment_repo::InstallmentRepository;
pub mod fixed_expense_repo;
pub use fixed_expense_repo::FixedExpenseRepository;
