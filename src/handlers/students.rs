use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::db::models::Student;
use crate::middleware::auth::RequireUser;
use crate::views::{self, StudentListView};
use crate::{RosterError, router::RosterState};

pub const LIST_PATH: &str = "/students/list";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// Submitted by the add/edit form. An empty `id` means a new record.
#[derive(Debug, Deserialize)]
pub struct StudentForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<i64>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
}

impl From<StudentForm> for Student {
    fn from(f: StudentForm) -> Self {
        Student {
            id: f.id,
            first_name: f.first_name,
            last_name: f.last_name,
        }
    }
}

fn empty_as_none<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// GET /students/ -> the listing.
pub async fn index(RequireUser(_user): RequireUser) -> Redirect {
    Redirect::to(LIST_PATH)
}

/// GET /students/list?page=&size=
pub async fn list(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, RosterError> {
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(state.default_page_size);

    let students = state.students.get_students(page, size).await?;
    let view = StudentListView::from(students);
    debug!(
        page,
        size,
        total_pages = view.total_pages,
        previous = view.adjacent.previous,
        next = view.adjacent.next,
        "rendering student list"
    );
    Ok(views::student_list(&view, &user.username))
}

/// GET /students/view?id=
pub async fn view(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Query(IdQuery { id }): Query<IdQuery>,
) -> Result<Html<String>, RosterError> {
    let student = state.students.get_student(id).await?.unwrap_or_default();
    Ok(views::student_view(id, &student, &user.username))
}

/// GET /students/add
pub async fn add(RequireUser(user): RequireUser) -> Html<String> {
    views::student_add(&Student::default(), &user.username)
}

/// GET /students/edit?id=
pub async fn edit(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Query(IdQuery { id }): Query<IdQuery>,
) -> Result<Html<String>, RosterError> {
    let student = state.students.get_student(id).await?.unwrap_or_default();
    Ok(views::student_edit(id, &student, &user.username))
}

/// GET /students/delete?id= -> confirmation page.
pub async fn confirm_delete(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Query(IdQuery { id }): Query<IdQuery>,
) -> Result<Html<String>, RosterError> {
    let student = state.students.get_student(id).await?.unwrap_or_default();
    Ok(views::student_delete(id, &student, &user.username))
}

/// POST /students/save
pub async fn save(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Form(form): Form<StudentForm>,
) -> Result<impl IntoResponse, RosterError> {
    let saved = state.students.save(form.into()).await?;
    info!(id = ?saved.id, by = %user.username, "student saved");
    Ok(Redirect::to(LIST_PATH))
}

/// POST /students/delete
pub async fn delete(
    State(state): State<RosterState>,
    RequireUser(user): RequireUser,
    Form(IdQuery { id }): Form<IdQuery>,
) -> Result<impl IntoResponse, RosterError> {
    state.students.delete(id).await?;
    info!(id, by = %user.username, "student deleted");
    Ok(Redirect::to(LIST_PATH))
}
