use crate::app::render;
use crate::core::links::{LinkBases, MapLinks};
use crate::core::projection;
use crate::core::selection::{Selection, Session};
use crate::core::{Catalog, Listing, Selector};
use crate::utils::error::{DirectoryError, ErrorCategory, Result};
use crate::utils::validation::validate_non_empty_string;
use std::io::{BufRead, Write};
use std::str::FromStr;

const HELP: &str = "\
commands:
  regions              지역 목록
  region <name|all>    지역 선택 (분류와 선택 초기화)
  categories           선택한 지역의 분류 목록
  category <name|all>  분류 선택
  search [text]        이름 검색 (인자 없으면 해제)
  list                 현재 목록
  pick <n>             목록의 n번 항목 상세 보기
  clear                선택 해제
  stats                분류별 개수
  help                 도움말
  quit                 종료
이름이 all/전체인 지역·분류는 =전체 처럼 앞에 = 를 붙입니다
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Regions,
    Region(Selector),
    Categories,
    Category(Selector),
    Search(Option<String>),
    List,
    Pick(usize),
    Clear,
    Stats,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = DirectoryError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let unknown = || DirectoryError::UnknownCommand {
            input: line.to_string(),
        };

        match verb {
            "regions" => Ok(BrowseCommand::Regions),
            "region" => {
                validate_non_empty_string("region", arg)?;
                Ok(BrowseCommand::Region(arg.parse().map_err(|_| unknown())?))
            }
            "categories" => Ok(BrowseCommand::Categories),
            "category" => {
                validate_non_empty_string("category", arg)?;
                Ok(BrowseCommand::Category(arg.parse().map_err(|_| unknown())?))
            }
            "search" => Ok(BrowseCommand::Search(
                Some(arg.to_string()).filter(|a| !a.is_empty()),
            )),
            "list" | "ls" => Ok(BrowseCommand::List),
            "pick" => arg
                .parse::<usize>()
                .map(BrowseCommand::Pick)
                .map_err(|_| unknown()),
            "clear" => Ok(BrowseCommand::Clear),
            "stats" => Ok(BrowseCommand::Stats),
            "help" | "?" => Ok(BrowseCommand::Help),
            "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
            _ => Err(unknown()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Interactive front end over one catalog. Each browser owns its own session.
pub struct Browser<'a, T: Listing> {
    catalog: &'a Catalog<T>,
    bases: &'a LinkBases,
    session: Session<T>,
}

impl<'a, T: Listing> Browser<'a, T> {
    pub fn new(catalog: &'a Catalog<T>, bases: &'a LinkBases) -> Self {
        Self {
            catalog,
            bases,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn execute(&mut self, command: BrowseCommand) -> Result<Flow> {
        tracing::debug!("browse command: {:?}", command);

        let output = match command {
            BrowseCommand::Regions => {
                render::render_names("지역", &projection::regions(self.catalog))
            }
            BrowseCommand::Region(region) => {
                self.session.set_region(region);
                format!(
                    "지역: {}\n{}",
                    self.session.region(),
                    render::render_list(&self.session.results(self.catalog))
                )
            }
            BrowseCommand::Categories => render::render_names(
                &format!("분류 ({})", self.session.region()),
                &projection::categories(self.catalog, self.session.region()),
            ),
            BrowseCommand::Category(category) => {
                self.session.set_category(category);
                format!(
                    "분류: {}\n{}",
                    self.session.category(),
                    render::render_list(&self.session.results(self.catalog))
                )
            }
            BrowseCommand::Search(needle) => {
                self.session.set_name_filter(needle);
                render::render_list(&self.session.results(self.catalog))
            }
            BrowseCommand::List => render::render_list(&self.session.results(self.catalog)),
            BrowseCommand::Pick(number) => {
                let index = number
                    .checked_sub(1)
                    .ok_or_else(|| DirectoryError::SelectionOutOfRange {
                        index: number,
                        len: self.session.results(self.catalog).len(),
                    })?;
                let bases = self.bases;
                let chosen = self.session.choose_index(self.catalog, index)?;
                let links = MapLinks::for_listing(&chosen.item, bases);
                render::render_detail(chosen, &links)
            }
            BrowseCommand::Clear => {
                self.session.clear();
                "선택을 해제했습니다.\n".to_string()
            }
            BrowseCommand::Stats => render::render_counts(&projection::category_counts(
                self.catalog,
                self.session.region(),
            )),
            BrowseCommand::Help => HELP.to_string(),
            BrowseCommand::Quit => return Ok(Flow::Quit),
        };

        Ok(Flow::Continue(output))
    }

    /// Reads commands line by line until `quit` or end of input. Input mistakes are
    /// reported and the loop continues; anything else ends the session.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        write!(output, "{}", HELP)?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                write!(output, "> ")?;
                output.flush()?;
                continue;
            }

            let result = line
                .parse::<BrowseCommand>()
                .and_then(|command| self.execute(command));

            match result {
                Ok(Flow::Continue(text)) => write!(output, "{}", text)?,
                Ok(Flow::Quit) => break,
                Err(e)
                    if matches!(
                        e.category(),
                        ErrorCategory::Input | ErrorCategory::Configuration
                    ) =>
                {
                    writeln!(output, "❌ {}", e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            }

            if let Selection::Selected(current) = self.session.selection() {
                tracing::debug!("current selection: {}", current.item.name());
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        Ok(())
    }
}
