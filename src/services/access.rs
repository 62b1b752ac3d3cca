use crate::db::models::User;
use crate::db::types::UserRole;

/// What an actor is trying to reach. Callers load the relevant records first;
/// the decision itself is pure and never errors.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    /// A course and anything scoped to it: its assignments, its submission
    /// roster, its grade listings.
    Course {
        teacher_id: &'a str,
        actively_enrolled: bool,
    },
    /// A student's aggregate record (grade history, performance insights).
    StudentRecord {
        student_id: &'a str,
        teacher_course_ids: &'a [String],
        student_course_ids: &'a [String],
    },
}

/// Central authorization decision. Teachers reach courses they own; students
/// reach courses they are actively enrolled in; a teacher reaches a student's
/// aggregate record only through at least one shared active course; students
/// never reach another student's record.
pub(crate) fn can_access(actor: &User, target: Target<'_>) -> bool {
    match target {
        Target::Course { teacher_id, actively_enrolled } => match actor.role {
            UserRole::Teacher => actor.id == teacher_id,
            UserRole::Student => actively_enrolled,
        },
        Target::StudentRecord { student_id, teacher_course_ids, student_course_ids } => {
            match actor.role {
                UserRole::Student => actor.id == student_id,
                UserRole::Teacher => shares_course(teacher_course_ids, student_course_ids),
            }
        }
    }
}

fn shares_course(teacher_course_ids: &[String], student_course_ids: &[String]) -> bool {
    teacher_course_ids.iter().any(|id| student_course_ids.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::primitive_now_utc;

    fn user(id: &str, role: UserRole) -> User {
        let now = primitive_now_utc();
        User {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{id}@example.com"),
            roll_number: matches!(role, UserRole::Student).then(|| format!("R-{id}")),
            hashed_password: "hash".to_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn teacher_reaches_own_course() {
        let teacher = user("t1", UserRole::Teacher);
        assert!(can_access(
            &teacher,
            Target::Course { teacher_id: "t1", actively_enrolled: false }
        ));
    }

    #[test]
    fn teacher_denied_on_foreign_course() {
        let teacher = user("t1", UserRole::Teacher);
        assert!(!can_access(
            &teacher,
            Target::Course { teacher_id: "t2", actively_enrolled: false }
        ));
    }

    #[test]
    fn student_reaches_enrolled_course_only() {
        let student = user("s1", UserRole::Student);
        assert!(can_access(
            &student,
            Target::Course { teacher_id: "t1", actively_enrolled: true }
        ));
        assert!(!can_access(
            &student,
            Target::Course { teacher_id: "t1", actively_enrolled: false }
        ));
    }

    #[test]
    fn student_reaches_own_record() {
        let student = user("s1", UserRole::Student);
        assert!(can_access(
            &student,
            Target::StudentRecord {
                student_id: "s1",
                teacher_course_ids: &[],
                student_course_ids: &[],
            }
        ));
    }

    #[test]
    fn student_denied_on_other_student_record() {
        let student = user("s1", UserRole::Student);
        let enrolled = ids(&["c1", "c2"]);
        // Even a shared course does not open another student's record.
        assert!(!can_access(
            &student,
            Target::StudentRecord {
                student_id: "s2",
                teacher_course_ids: &enrolled,
                student_course_ids: &enrolled,
            }
        ));
    }

    #[test]
    fn teacher_reaches_student_through_shared_course() {
        let teacher = user("t1", UserRole::Teacher);
        let owned = ids(&["c1", "c2"]);
        let enrolled = ids(&["c2", "c3"]);
        assert!(can_access(
            &teacher,
            Target::StudentRecord {
                student_id: "s1",
                teacher_course_ids: &owned,
                student_course_ids: &enrolled,
            }
        ));
    }

    #[test]
    fn teacher_denied_without_shared_course() {
        let teacher = user("t1", UserRole::Teacher);
        let owned = ids(&["c1"]);
        let enrolled = ids(&["c2", "c3"]);
        assert!(!can_access(
            &teacher,
            Target::StudentRecord {
                student_id: "s1",
                teacher_course_ids: &owned,
                student_course_ids: &enrolled,
            }
        ));
    }

    #[test]
    fn empty_course_sets_deny_teacher() {
        let teacher = user("t1", UserRole::Teacher);
        assert!(!can_access(
            &teacher,
            Target::StudentRecord {
                student_id: "s1",
                teacher_course_ids: &[],
                student_course_ids: &[],
            }
        ));
    }
}
