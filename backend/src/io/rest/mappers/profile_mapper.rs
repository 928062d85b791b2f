use crate::domain::models::profile::UserProfile as DomainProfile;
use shared::UserProfile as SharedProfile;

pub struct ProfileMapper;

impl ProfileMapper {
    pub fn to_dto(domain: DomainProfile) -> SharedProfile {
        SharedProfile {
            id: domain.id,
            name: domain.name,
            email: domain.email,
            age: domain.age,
            job: domain.job,
            address: domain.address,
            photo_url: domain.photo_url,
            budget_total: domain.budget_total,
            budget_left: domain.budget_left,
            income_total: domain.income_total,
            expense_total: domain.expense_total,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
