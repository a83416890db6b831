// Template context structures for the Askama-rendered examination
// minutes document ("Πρακτικό Εξέτασης").

use askama::Template;

/// All the data the minutes document substitutes into its fixed text.
pub struct PraktikoDoc {
    pub title: String,
    pub student_name: String,
    pub student_number: String,
    pub supervisor_name: String,
    pub members: Vec<String>,
    pub grades: Vec<GradeLine>,
    pub final_grade: String,
    pub gs_reference: String,
    pub presentation_line: String,
    pub generated_on: String,
}

pub struct GradeLine {
    pub professor_name: String,
    pub grade: String,
    pub criteria: String,
}

#[derive(Template)]
#[template(path = "praktiko.html")]
pub struct PraktikoHtmlTemplate {
    pub doc: PraktikoDoc,
}

#[derive(Template)]
#[template(path = "praktiko.txt")]
pub struct PraktikoTextTemplate {
    pub doc: PraktikoDoc,
}
