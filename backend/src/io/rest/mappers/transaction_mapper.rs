use crate::domain::models::transaction::{
    Transaction as DomainTransaction, TransactionType as DomainTransactionType,
};
use shared::{Transaction as SharedTransaction, TransactionType as SharedTransactionType};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            user_id: domain.user_id,
            date: domain.date,
            description: domain.description,
            amount: domain.amount,
            category: domain.category,
            transaction_type: Self::to_dto_type(domain.transaction_type),
        }
    }

    pub fn to_domain_type(dto_type: SharedTransactionType) -> DomainTransactionType {
        match dto_type {
            SharedTransactionType::Income => DomainTransactionType::Income,
            SharedTransactionType::Expense => DomainTransactionType::Expense,
        }
    }

    pub fn to_dto_type(domain_type: DomainTransactionType) -> SharedTransactionType {
        match domain_type {
            DomainTransactionType::Income => SharedTransactionType::Income,
            DomainTransactionType::Expense => SharedTransactionType::Expense,
        }
    }
}
