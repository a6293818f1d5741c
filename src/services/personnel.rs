//! Personnel deployment transitions.

use super::RecordService;
use crate::auth::Session;
use crate::errors::AppError;
use crate::models::{
    non_blank, Assignment, Mutation, Personnel, PersonnelStatus, ReturnRequest, Validator,
};

impl RecordService<'_, Personnel> {
    /// Deploy a person: status becomes `Deployed`, unit and notes are overwritten.
    pub async fn assign(
        &self,
        session: &Session,
        id: &str,
        assignment: Assignment,
    ) -> Result<Personnel, AppError> {
        let principal = session.require()?;
        let unit =
            non_blank(assignment.assignment).ok_or_else(|| AppError::missing("assignment"))?;
        let location = non_blank(assignment.location).unwrap_or_default();
        let notes = non_blank(assignment.notes);

        let audit = format!(
            "Assignment: {}, Location: {}. {}",
            unit,
            location,
            notes.as_deref().unwrap_or_default()
        );

        self.modify(
            principal,
            id,
            Mutation::Deploy,
            audit.trim_end().to_string(),
            move |person, now| {
                person.status = PersonnelStatus::Deployed;
                person.unit = unit;
                person.notes = notes;
                person.last_updated = now;
            },
        )
        .await
    }

    /// Bring a person back from an assignment with a new status and unit.
    pub async fn return_from_assignment(
        &self,
        session: &Session,
        id: &str,
        request: ReturnRequest,
    ) -> Result<Personnel, AppError> {
        let principal = session.require()?;

        let mut v = Validator::default();
        let status = v.required_enum::<PersonnelStatus>("status", request.status);
        let unit = v.required("unit", request.unit);
        let (Some(status), Some(unit)) = (status, unit) else {
            return Err(v.into_error());
        };
        let notes = non_blank(request.notes);

        let audit = format!(
            "Status: {}, Unit: {}. {}",
            status,
            unit,
            notes.as_deref().unwrap_or_default()
        );

        self.modify(
            principal,
            id,
            Mutation::Return,
            audit.trim_end().to_string(),
            move |person, now| {
                person.status = status;
                person.unit = unit;
                person.notes = notes;
                person.last_updated = now;
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use crate::db::{init_database, Repository};
    use crate::models::PersonnelInput;
    use crate::services::Clock;
    use tempfile::TempDir;

    async fn setup() -> (Repository, Clock, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"))
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), Clock::new(), temp_dir)
    }

    fn session() -> Session {
        Session::Authenticated(Principal::new("Capt Reynolds"))
    }

    async fn seed(service: &RecordService<'_, Personnel>) -> Personnel {
        let input = PersonnelInput {
            id: Some("P1001".to_string()),
            name: Some("John Doe".to_string()),
            rank: Some("Sergeant".to_string()),
            unit: Some("1st Battalion".to_string()),
            status: Some("Active".to_string()),
            ..Default::default()
        };
        service.create(&session(), input).await.unwrap()
    }

    #[tokio::test]
    async fn test_assign_deploys_and_logs() {
        let (repo, clock, _dir) = setup().await;
        let service = RecordService::<Personnel>::new(&repo, &clock);
        let created = seed(&service).await;

        let deployed = service
            .assign(
                &session(),
                "P1001",
                Assignment {
                    assignment: Some("Task Force Alpha".to_string()),
                    location: Some("Forward Base".to_string()),
                    notes: Some("Temporary".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(deployed.status, PersonnelStatus::Deployed);
        assert_eq!(deployed.unit, "Task Force Alpha");
        assert_eq!(deployed.notes.as_deref(), Some("Temporary"));
        assert!(deployed.last_updated > created.last_updated);

        let activity = &repo.list_activities(1).await.unwrap()[0];
        assert_eq!(activity.kind, "personnel-deploy");
        assert_eq!(
            activity.notes,
            "Assignment: Task Force Alpha, Location: Forward Base. Temporary"
        );
        assert_eq!(activity.user, "Capt Reynolds");
        assert_eq!(activity.user_initials, "CR");
    }

    #[tokio::test]
    async fn test_return_sets_requested_status() {
        let (repo, clock, _dir) = setup().await;
        let service = RecordService::<Personnel>::new(&repo, &clock);
        seed(&service).await;

        let returned = service
            .return_from_assignment(
                &session(),
                "P1001",
                ReturnRequest {
                    status: Some("On Leave".to_string()),
                    unit: Some("2nd Battalion".to_string()),
                    notes: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(returned.status, PersonnelStatus::OnLeave);
        assert_eq!(returned.unit, "2nd Battalion");
        assert_eq!(returned.notes, None);

        let activity = &repo.list_activities(1).await.unwrap()[0];
        assert_eq!(activity.kind, "personnel-return");
        assert_eq!(activity.notes, "Status: On Leave, Unit: 2nd Battalion.");
    }

    #[tokio::test]
    async fn test_transitions_on_unknown_id_are_not_found() {
        let (repo, clock, _dir) = setup().await;
        let service = RecordService::<Personnel>::new(&repo, &clock);

        let assign = service
            .assign(
                &session(),
                "P404",
                Assignment {
                    assignment: Some("Task Force Alpha".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(assign, Err(AppError::NotFound(_))));

        let ret = service
            .return_from_assignment(
                &session(),
                "P404",
                ReturnRequest {
                    status: Some("Active".to_string()),
                    unit: Some("HQ".to_string()),
                    notes: None,
                },
            )
            .await;
        assert!(matches!(ret, Err(AppError::NotFound(_))));
        assert!(repo.list_activities(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_return_validates_status() {
        let (repo, clock, _dir) = setup().await;
        let service = RecordService::<Personnel>::new(&repo, &clock);
        seed(&service).await;

        let err = service
            .return_from_assignment(
                &session(),
                "P1001",
                ReturnRequest {
                    status: Some("Retired".to_string()),
                    unit: None,
                    notes: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.invalid, vec!["status"]);
                assert_eq!(fields.missing, vec!["unit"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
