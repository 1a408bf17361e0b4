use crate::domain::commands::transactions::TransactionCommand;
use crate::domain::models::transaction::{
    Transaction as DomainTransaction, TransactionStatus as DomainTransactionStatus,
    TransactionType as DomainTransactionType,
};
use shared::{
    TransactionRequest, TransactionResponse, TransactionStatus as SharedTransactionStatus,
    TransactionType as SharedTransactionType,
};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_command(account_id: i64, dto: TransactionRequest) -> TransactionCommand {
        TransactionCommand {
            account_id,
            amount: dto.amount,
            description: dto.description,
        }
    }

    pub fn to_dto(domain: DomainTransaction) -> TransactionResponse {
        TransactionResponse {
            id: domain.id,
            amount: domain.amount,
            transaction_type: Self::to_dto_type(domain.transaction_type),
            status: Self::to_dto_status(domain.status),
            description: domain.description,
            timestamp: domain.timestamp,
            bank_account_id: domain.account_id,
        }
    }

    fn to_dto_type(domain_type: DomainTransactionType) -> SharedTransactionType {
        match domain_type {
            DomainTransactionType::Deposit => SharedTransactionType::Deposit,
            DomainTransactionType::Withdrawal => SharedTransactionType::Withdrawal,
        }
    }

    fn to_dto_status(domain_status: DomainTransactionStatus) -> SharedTransactionStatus {
        match domain_status {
            DomainTransactionStatus::Completed => SharedTransactionStatus::Completed,
            DomainTransactionStatus::Failed => SharedTransactionStatus::Failed,
        }
    }
}
