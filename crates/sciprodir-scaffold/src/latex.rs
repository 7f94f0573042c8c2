//! LaTeX documentation stubs.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::info;

use crate::error::{Result, ScaffoldError};

/// Title page details.
#[derive(Debug, Clone, Default)]
pub struct LatexMeta {
    pub project_name: String,
    pub description: String,
    pub author: String,
    pub organization: Option<String>,
    pub orcid: Option<String>,
    pub supervisor: Option<String>,
}

const MAIN_TEX: &str = r"\documentclass[12pt,a4paper]{article}

\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{graphicx}
\usepackage{float}
\usepackage{acronym}
\usepackage{hyperref}
\usepackage[backend=biber,style=numeric]{biblatex}
\addbibresource{citations.bib}

\begin{document}

\input{title_page}
\newpage

\input{abstract}
\newpage

\tableofcontents
\newpage

\input{abbreviations}
\newpage

\input{introduction}
\input{materials_methods}
\input{results}
\input{discussion}
\newpage

\printbibliography
\newpage

\input{attachments}

\end{document}
";

/// Section files and their headings, in document order.
fn sections() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        ("introduction.tex", "Introduction"),
        ("materials_methods.tex", "Materials and Methods"),
        ("results.tex", "Results"),
        ("discussion.tex", "Discussion"),
    ])
}

/// Render `title_page.tex`.
pub fn title_page(meta: &LatexMeta) -> String {
    let organization = meta
        .organization
        .as_deref()
        .map(|org| format!("\tOrganization:\\par\n\t{{\\scshape\\Large {org}\\par}}\n\t\\vfill\n"))
        .unwrap_or_default();
    let orcid = meta
        .orcid
        .as_deref()
        .map(|id| format!("\tORCID:\thttps://orcid.org/{id}\n"))
        .unwrap_or_default();
    let supervisor = meta.supervisor.as_deref().unwrap_or_default();

    format!(
        "\\begin{{titlepage}}\n\
         \t\\centering\n\
         \t\\vfill\n\
         {organization}\
         \tProject:\\par\n\
         \t{{\\scshape\\large {name}\\par}}\n\
         \t\\vspace{{1.5cm}}\n\
         \t{{\\huge\\bfseries {description}\\par}}\n\
         \t\\vfill\n\
         \tWritten by:\\par\n\
         \t{{\\large\\itshape {author}\\par}}\n\
         {orcid}\
         \t\\vfill\n\
         \tsupervised by \\par\n\
         \t{supervisor}\n\
         \t\\vfill\n\
         \t{{\\large \\today\\par}}\n\
         \\end{{titlepage}}",
        name = meta.project_name,
        description = meta.description,
        author = meta.author,
    )
}

fn section(heading: &str) -> String {
    format!(
        "\\section{{{heading}}}\n\n\t% TODO: Write {} here.\n\t\n",
        heading.to_lowercase()
    )
}

/// Write every LaTeX stub into `doc_dir` and return the written paths.
pub fn write_latex(doc_dir: &Path, meta: &LatexMeta) -> Result<Vec<PathBuf>> {
    info!(path = %doc_dir.display(), "Creating latex files");

    let mut files: Vec<(String, String)> = vec![
        ("main.tex".into(), MAIN_TEX.to_string()),
        ("title_page.tex".into(), title_page(meta)),
        (
            "abstract.tex".into(),
            "\\section*{Abstract}\n\t\n\t% TODO: Write your abstract here".into(),
        ),
        (
            "abbreviations.tex".into(),
            "\\section*{\\Huge Abbreviations}\n\t\\begin{acronym}\n\t\t\n\t\t%TODO: add abbreviations here.\n\t\t\n\t\\end{acronym}".into(),
        ),
    ];
    files.extend(
        sections()
            .into_iter()
            .map(|(file, heading)| (file.to_string(), section(heading))),
    );
    files.push((
        "attachments.tex".into(),
        "\\section*{\\Huge Attachments}\n\t\n\t% TODO: Add your attachments here.\n".into(),
    ));
    files.push((
        "citations.bib".into(),
        "% Encoding: UTF-8\n\n% TODO: Add your references here.".into(),
    ));

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = doc_dir.join(name);
        fs::write(&path, content).map_err(|e| ScaffoldError::io(&path, e))?;
        info!(path = %path.display(), "Created latex file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn meta() -> LatexMeta {
        LatexMeta {
            project_name: "protein folding".into(),
            description: "Folding proteins fast".into(),
            author: "Ada Lovelace".into(),
            organization: Some("University".into()),
            orcid: Some("0000-0002-1825-0097".into()),
            supervisor: None,
        }
    }

    #[test]
    fn test_title_page() {
        let page = title_page(&meta());
        assert!(page.starts_with("\\begin{titlepage}\n\t\\centering"));
        assert!(page.contains("\t{\\scshape\\Large University\\par}\n"));
        assert!(page.contains("\t{\\scshape\\large protein folding\\par}\n"));
        assert!(page.contains("\tORCID:\thttps://orcid.org/0000-0002-1825-0097\n"));
        assert!(page.ends_with("\\end{titlepage}"));
    }

    #[test]
    fn test_title_page_without_optional_fields() {
        let page = title_page(&LatexMeta {
            organization: None,
            orcid: None,
            ..meta()
        });
        assert!(!page.contains("Organization"));
        assert!(!page.contains("ORCID"));
    }

    #[test]
    fn test_section() {
        assert_eq!(
            section("Materials and Methods"),
            "\\section{Materials and Methods}\n\n\t% TODO: Write materials and methods here.\n\t\n"
        );
    }

    #[test]
    fn test_write_latex() {
        let temp = TempDir::new().unwrap();
        let written = write_latex(temp.path(), &meta()).unwrap();

        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "main.tex",
                "title_page.tex",
                "abstract.tex",
                "abbreviations.tex",
                "introduction.tex",
                "materials_methods.tex",
                "results.tex",
                "discussion.tex",
                "attachments.tex",
                "citations.bib",
            ]
        );

        let main = fs::read_to_string(temp.path().join("main.tex")).unwrap();
        assert!(main.contains("\\input{attachments}"));
        assert!(main.contains("\\addbibresource{citations.bib}"));
    }
}
