//! Server-rendered HTML pages.

use axum::response::Html;

use crate::db::models::Student;
use crate::pagination::{AdjacentPages, Page};

/// Escape text for element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, user: Option<&str>, body: &str) -> Html<String> {
    let nav = match user {
        Some(name) => format!(
            r#"<nav><a href="/students/list">Students</a> | signed in as {} <form method="post" action="/logout" style="display:inline"><button type="submit">Log out</button></form></nav>"#,
            escape(name)
        ),
        None => String::new(),
    };
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{nav}
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn field(value: Option<&str>) -> String {
    escape(value.unwrap_or_default())
}

fn id_text(student: &Student) -> String {
    student.id.map(|id| id.to_string()).unwrap_or_default()
}

/// Data backing the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentListView {
    pub students: Vec<Student>,
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub adjacent: AdjacentPages,
}

impl From<Page<Student>> for StudentListView {
    fn from(page: Page<Student>) -> Self {
        let adjacent = page.adjacent();
        Self {
            page: page.number,
            size: page.size,
            total_pages: page.total_pages,
            students: page.items,
            adjacent,
        }
    }
}

pub fn student_list(view: &StudentListView, user: &str) -> Html<String> {
    let mut rows = String::new();
    for s in &view.students {
        let id = id_text(s);
        rows.push_str(&format!(
            r#"<tr data-student-id="{id}"><td>{id}</td><td>{first}</td><td>{last}</td><td><a href="/students/view?id={id}">View</a> <a href="/students/edit?id={id}">Edit</a> <a href="/students/delete?id={id}">Delete</a></td></tr>"#,
            first = field(s.first_name.as_deref()),
            last = field(s.last_name.as_deref()),
        ));
        rows.push('\n');
    }

    let mut pager = format!(
        r#"<div class="pager" data-previous-page="{prev}" data-next-page="{next}" data-total-pages="{total}">"#,
        prev = view.adjacent.previous,
        next = view.adjacent.next,
        total = view.total_pages,
    );
    if view.adjacent.has_previous() {
        pager.push_str(&format!(
            r#"<a rel="prev" href="/students/list?page={}&amp;size={}">Previous</a> "#,
            view.adjacent.previous, view.size
        ));
    }
    pager.push_str(&format!("<span>Page {}</span>", u64::from(view.page) + 1));
    if view.adjacent.has_next() {
        pager.push_str(&format!(
            r#" <a rel="next" href="/students/list?page={}&amp;size={}">Next</a>"#,
            view.adjacent.next, view.size
        ));
    }
    pager.push_str("</div>");

    let body = format!(
        r#"<p><a href="/students/add">Add student</a></p>
<table>
<thead><tr><th>Id</th><th>First name</th><th>Last name</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>
{pager}"#
    );
    layout("Students", Some(user), &body)
}

fn details(student: &Student) -> String {
    format!(
        r#"<dl class="student" data-student-id="{id}">
<dt>Id</dt><dd>{id}</dd>
<dt>First name</dt><dd>{first}</dd>
<dt>Last name</dt><dd>{last}</dd>
</dl>"#,
        id = id_text(student),
        first = field(student.first_name.as_deref()),
        last = field(student.last_name.as_deref()),
    )
}

fn form(student: &Student) -> String {
    format!(
        r#"<form method="post" action="/students/save">
<input type="hidden" name="id" value="{id}">
<label>First name <input type="text" name="firstName" value="{first}"></label>
<label>Last name <input type="text" name="lastName" value="{last}"></label>
<button type="submit">Save</button>
</form>
<p><a href="/students/list">Back to list</a></p>"#,
        id = id_text(student),
        first = field(student.first_name.as_deref()),
        last = field(student.last_name.as_deref()),
    )
}

/// `student` is empty when the requested id was not found.
pub fn student_view(id: i64, student: &Student, user: &str) -> Html<String> {
    let body = format!(
        r#"<p data-requested-id="{id}"></p>
{}
<p><a href="/students/list">Back to list</a></p>"#,
        details(student)
    );
    layout("Student", Some(user), &body)
}

pub fn student_add(student: &Student, user: &str) -> Html<String> {
    layout("Add student", Some(user), &form(student))
}

pub fn student_edit(id: i64, student: &Student, user: &str) -> Html<String> {
    let body = format!(
        r#"<p data-requested-id="{id}"></p>
{}"#,
        form(student)
    );
    layout("Edit student", Some(user), &body)
}

pub fn student_delete(id: i64, student: &Student, user: &str) -> Html<String> {
    let body = format!(
        r#"<p data-requested-id="{id}">Delete this student?</p>
{}
<form method="post" action="/students/delete">
<input type="hidden" name="id" value="{id}">
<button type="submit">Delete</button>
</form>
<p><a href="/students/list">Cancel</a></p>"#,
        details(student)
    );
    layout("Delete student", Some(user), &body)
}

pub fn login(error: bool, logged_out: bool) -> Html<String> {
    let mut notice = String::new();
    if error {
        notice.push_str(r#"<p class="error">Invalid username or password.</p>"#);
    }
    if logged_out {
        notice.push_str(r#"<p class="info">You have been signed out.</p>"#);
    }
    let body = format!(
        r#"{notice}
<form method="post" action="/login">
<label>Username <input type="text" name="username" autofocus></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Sign in</button>
</form>"#
    );
    layout("Please sign in", None, &body)
}
