use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Pageant, Participant};
use crate::repository::organization::OrganizationRepository;
use crate::repository::pageant::PageantRepository;
use crate::repository::participant::ParticipantRepository;

/// Single ownership policy for organizer-gated operations: resolve the
/// resource up to its organization and compare the owner to the caller.
/// Every review and scoring handler goes through here instead of deriving
/// the chain ad hoc.
pub struct OwnershipPolicy<'a> {
    pool: &'a PgPool,
}

impl<'a> OwnershipPolicy<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Caller must own the organization running this pageant.
    pub async fn ensure_pageant_owner(&self, pageant_id: Uuid, actor: Uuid) -> Result<Pageant> {
        let pageant = PageantRepository::new(self.pool).find_by_id(pageant_id).await?;
        let organization = OrganizationRepository::new(self.pool)
            .find_by_id(pageant.organization_id)
            .await?;

        if organization.owner_id != actor {
            return Err(StorageError::Unauthorized);
        }

        Ok(pageant)
    }

    /// Caller must own the organization behind the participant's pageant.
    /// Returns both records since callers invariably need them next.
    pub async fn ensure_participant_owner(
        &self,
        participant_id: Uuid,
        actor: Uuid,
    ) -> Result<(Participant, Pageant)> {
        let participant = ParticipantRepository::new(self.pool)
            .find_by_id(participant_id)
            .await?;
        let pageant = self
            .ensure_pageant_owner(participant.pageant_id, actor)
            .await?;

        Ok((participant, pageant))
    }
}
