use crate::roster::{CrewList, LoadedRoster};
use crate::sortbar::{SortBar, bar_def};
use crate::states::{self, SortBarStore};
use crate::statics;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::{path::PathBuf, sync::OnceLock};

pub fn run_gui() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| {
            let store_path = states::default_path();
            let store = SortBarStore::load_path(&store_path);
            Ok(Box::new(KrstApp {
                store,
                store_path,
                crew_bar: SortBar::new(bar_def(CrewList::Available)),
                applicants_bar: SortBar::new(bar_def(CrewList::Applicants)),
                theme_dark: true,
                ..Default::default()
            }))
        }),
    )
}

/// The main application state and GUI logic.
/// Stores the LoadedRoster (owned), both sort bars, and the persisted
/// sort-bar states.
#[derive(Default)]
struct KrstApp {
    roster: Option<LoadedRoster>,
    store: SortBarStore,
    store_path: PathBuf,

    // The crew bar is bound to whichever tab is showing; the applicants bar
    // keeps its own list.
    crew_tab: CrewList,
    crew_bar: SortBar,
    applicants_bar: SortBar,

    dialog_dir: Option<PathBuf>,
    status: String,
    last_error: Option<String>,

    // Feature parity: About dialog.
    about_open: bool,

    // Theme.
    theme_dark: bool,
}

impl KrstApp {
    fn format_stat(v: f64) -> String {
        // Courage/stupidity are 0..1 fractions; keep the table readable
        // without dragging full float noise into it.
        if !v.is_finite() {
            return v.to_string();
        }

        let mut s = format!("{v:.3}");
        if s.contains('.') {
            while s.ends_with('0') {
                s.pop();
            }
            if s.ends_with('.') {
                s.pop();
            }
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    fn flags_label(veteran: bool, badass: bool) -> String {
        match (veteran, badass) {
            (true, true) => format!(
                "{}, {}",
                statics::EN_FLAG_VETERAN,
                statics::EN_FLAG_BADASS
            ),
            (true, false) => statics::EN_FLAG_VETERAN.to_string(),
            (false, true) => statics::EN_FLAG_BADASS.to_string(),
            (false, false) => statics::EN_EMPTY.to_string(),
        }
    }

    /// Rebind both bars right after a load: fresh definitions, stored
    /// selections restored, restored sorts applied to the file order.
    fn restore_sort_bars(&mut self) {
        self.crew_tab = CrewList::Available;
        self.crew_bar.set_definition(bar_def(self.crew_tab));
        self.applicants_bar.set_definition(bar_def(CrewList::Applicants));

        if self.store.is_stored(self.crew_tab.name()) {
            let state = self.store.get(self.crew_tab.name()).unwrap_or_default();
            self.crew_bar.set_state(state);
        }
        if self.store.is_stored(CrewList::Applicants.name()) {
            let state = self
                .store
                .get(CrewList::Applicants.name())
                .unwrap_or_default();
            self.applicants_bar.set_state(state);
        }

        self.apply_crew_sort();
        self.apply_applicants_sort();
    }

    fn switch_crew_tab(&mut self, list: CrewList) {
        // Re-clicking the current tab must not reset the bar.
        if list == self.crew_tab {
            return;
        }
        self.crew_tab = list;
        self.crew_bar.set_definition(bar_def(list));
        if self.store.is_stored(list.name()) {
            let state = self.store.get(list.name()).unwrap_or_default();
            self.crew_bar.set_state(state);
        }
        self.apply_crew_sort();
    }

    fn apply_crew_sort(&mut self) {
        let state = self.crew_bar.state();
        if let Some(roster) = self.roster.as_mut() {
            roster.sort_list(self.crew_tab, |a, b| state.compare(a, b));
        }
    }

    fn apply_applicants_sort(&mut self) {
        let state = self.applicants_bar.state();
        if let Some(roster) = self.roster.as_mut() {
            roster.sort_list(CrewList::Applicants, |a, b| state.compare(a, b));
        }
    }

    /// A click changed the crew bar: re-sort the showing list and persist
    /// the selection under that list's name.
    fn remember_crew_bar(&mut self) {
        self.apply_crew_sort();
        self.store.set(self.crew_tab.name(), self.crew_bar.state());
        self.persist_store();
    }

    fn remember_applicants_bar(&mut self) {
        self.apply_applicants_sort();
        self.store
            .set(CrewList::Applicants.name(), self.applicants_bar.state());
        self.persist_store();
    }

    fn persist_store(&mut self) {
        if let Err(e) = self.store.save_path(&self.store_path) {
            log::error!("saving sort settings: {e:#}");
            self.last_error = Some(format!("Failed to save sort settings: {e:#}"));
        }
    }

    fn hire_applicant(&mut self, name: &str) {
        let Some(roster) = self.roster.as_mut() else {
            return;
        };
        match roster.hire(name) {
            Ok(()) => {
                // The new hire lands in the crew; keep the showing list sorted.
                self.apply_crew_sort();
                self.status = format!("Hired {name}");
            }
            Err(e) => {
                log::error!("hire failed: {e:#}");
                self.last_error = Some(format!("Failed to hire: {e:#}"));
            }
        }
    }

    fn sack_crew(&mut self, name: &str) {
        let Some(roster) = self.roster.as_mut() else {
            return;
        };
        match roster.sack(name) {
            Ok(()) => {
                // The sacked member rejoins the applicant pool.
                self.apply_applicants_sort();
                self.status = format!("Sacked {name}");
            }
            Err(e) => {
                log::error!("sack failed: {e:#}");
                self.last_error = Some(format!("Failed to sack: {e:#}"));
            }
        }
    }

    fn default_saves_dir() -> Option<PathBuf> {
        let home = std::env::var_os("USERPROFILE")
            .or_else(|| std::env::var_os("HOME"))
            .map(PathBuf::from)?;

        // Steam's usual install spots. Missing is fine; the dialog falls
        // back to its platform default.
        [
            home.join("Steam/steamapps/common/Kerbal Space Program/saves"),
            home.join(".local/share/Steam/steamapps/common/Kerbal Space Program/saves"),
            home.join("Library/Application Support/Steam/steamapps/common/Kerbal Space Program/saves"),
        ]
        .into_iter()
        .find(|p| p.is_dir())
    }

    fn initial_dialog_dir() -> Option<PathBuf> {
        static CACHED: OnceLock<Option<PathBuf>> = OnceLock::new();
        CACHED.get_or_init(Self::default_saves_dir).clone()
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new().add_filter("KSP Save", &["sfs"]);

        if let Some(dir) = self.dialog_dir.clone().or_else(Self::initial_dialog_dir) {
            dlg = dlg.set_directory(dir);
        }

        dlg
    }

    fn open_file(&mut self) {
        let Some(path) = self.file_dialog().pick_file() else {
            return;
        };

        match LoadedRoster::load_path(&path) {
            Ok(roster) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {}", path.display());
                self.last_error = None;
                self.roster = Some(roster);
                self.restore_sort_bars();
            }
            Err(e) => {
                log::error!("load failed: {e:#}");
                self.last_error = Some(format!("Failed to load: {e:#}"));
            }
        }
    }

    fn save_file_as(&mut self) {
        let mut dlg = self.file_dialog();
        if let Some(roster) = self.roster.as_ref()
            && let Some(source_path) = roster.source_path.as_ref()
            && let Some(file_name) = source_path.file_name()
        {
            dlg = dlg.set_file_name(file_name.to_string_lossy());
        }

        let Some(path) = dlg.save_file() else {
            return;
        };

        let Some(roster) = self.roster.as_mut() else {
            return;
        };

        if let Err(e) = roster.save_to_path(&path) {
            log::error!("save failed: {e:#}");
            self.last_error = Some(format!("Failed to save: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Saved {}", path.display());
            self.last_error = None;
        }
    }

    fn close_file(&mut self) {
        let Some(roster) = self.roster.take() else {
            return;
        };
        let closed = roster
            .source_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());

        // Bars go back to the blank disabled state until the next load.
        self.crew_tab = CrewList::Available;
        self.crew_bar = SortBar::default();
        self.applicants_bar = SortBar::default();
        self.status = format!("Closed {closed}");
    }
}

impl eframe::App for KrstApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN).clicked() {
                    self.open_file();
                }

                let has_roster = self.roster.is_some();
                if ui
                    .add_enabled(has_roster, egui::Button::new(statics::EN_BTN_SAVE_AS))
                    .clicked()
                {
                    self.save_file_as();
                }
                if ui
                    .add_enabled(has_roster, egui::Button::new(statics::EN_BTN_CLOSE))
                    .clicked()
                {
                    self.close_file();
                }

                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_BLURB);
                    ui.separator();
                    ui.hyperlink_to(
                        format!("{} @ {}", statics::EN_PROJECT_REPO, statics::GITHUB_URL),
                        statics::GITHUB_URL,
                    );
                });
            self.about_open = open;
        }

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        if self.roster.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(statics::EN_HOME_HEADING);
                ui.label(statics::EN_HOME_INSTRUCTIONS);
            });
            return;
        }

        // Snapshot what the panels draw so `self` stays free for the
        // handlers that run after layout.
        let (file_label, dirty, counts, applicant_rows, crew_rows) = {
            let roster = self.roster.as_ref().expect("checked above");
            let file_label = roster
                .source_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| statics::EN_PLACEHOLDER_UNSAVED.to_string());
            let counts = (
                roster.index.available.len(),
                roster.index.assigned.len(),
                roster.index.killed.len(),
                roster.index.applicants.len(),
            );
            (
                file_label,
                roster.dirty,
                counts,
                roster.index.applicants.clone(),
                roster.index.list(self.crew_tab).to_vec(),
            )
        };

        // Intents collected while the panels draw, applied afterwards.
        let mut tab_clicked: Option<CrewList> = None;
        let mut hire_clicked: Option<String> = None;
        let mut sack_clicked: Option<String> = None;
        let mut crew_bar_changed = false;
        let mut applicants_bar_changed = false;

        // The bottom status bar must be shown before side/central panels so it
        // reserves space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(file_label);
                ui.separator();
                ui.label(format!("available: {}", counts.0));
                ui.separator();
                ui.label(format!("assigned: {}", counts.1));
                ui.separator();
                ui.label(format!("lost: {}", counts.2));
                ui.separator();
                ui.label(format!("applicants: {}", counts.3));
                if dirty {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_DIRTY);
                }
            });
        });

        egui::SidePanel::left("applicants_panel")
            .resizable(true)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.heading(statics::EN_HEADING_APPLICANTS);
                ui.separator();

                if self.applicants_bar.ui(ui) {
                    applicants_bar_changed = true;
                }
                ui.separator();

                if applicant_rows.is_empty() {
                    ui.label(statics::EN_APPLICANTS_EMPTY);
                    return;
                }

                let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
                ui.push_id("applicants_table", |ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                        .column(Column::initial(46.0))
                        .column(Column::initial(140.0).resizable(true))
                        .column(Column::initial(80.0).resizable(true))
                        .column(Column::initial(64.0).resizable(true))
                        .column(Column::initial(64.0).resizable(true))
                        .column(Column::remainder())
                        .header(row_h, |mut header| {
                            header.col(|_ui| {});
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_NAME);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_CLASS);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_COURAGE);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_STUPIDITY);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_GENDER);
                            });
                        })
                        .body(|mut body| {
                            for applicant in &applicant_rows {
                                body.row(row_h, |mut row| {
                                    row.col(|ui| {
                                        if ui.small_button(statics::EN_BTN_HIRE).clicked() {
                                            hire_clicked = Some(applicant.name.clone());
                                        }
                                    });
                                    row.col(|ui| {
                                        ui.label(&applicant.name);
                                    });
                                    row.col(|ui| {
                                        ui.label(&applicant.profession);
                                    });
                                    row.col(|ui| {
                                        ui.monospace(Self::format_stat(applicant.courage));
                                    });
                                    row.col(|ui| {
                                        ui.monospace(Self::format_stat(applicant.stupidity));
                                    });
                                    row.col(|ui| {
                                        ui.label(&applicant.gender);
                                    });
                                });
                            }
                        });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(statics::EN_HEADING_CREW);
            ui.separator();

            ui.horizontal(|ui| {
                for (list, label) in [
                    (CrewList::Available, statics::EN_TAB_AVAILABLE),
                    (CrewList::Assigned, statics::EN_TAB_ASSIGNED),
                    (CrewList::Killed, statics::EN_TAB_LOST),
                ] {
                    if ui.selectable_label(self.crew_tab == list, label).clicked() {
                        tab_clicked = Some(list);
                    }
                }
            });
            ui.separator();

            if self.crew_bar.ui(ui) {
                crew_bar_changed = true;
            }
            ui.separator();

            if crew_rows.is_empty() {
                ui.label(statics::EN_LIST_EMPTY);
                return;
            }

            let show_sack = self.crew_tab == CrewList::Available;
            let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
            ui.push_id("crew_table", |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(46.0))
                    .column(Column::initial(140.0).resizable(true))
                    .column(Column::initial(90.0).resizable(true))
                    .column(Column::initial(48.0).resizable(true))
                    .column(Column::initial(64.0).resizable(true))
                    .column(Column::initial(64.0).resizable(true))
                    .column(Column::initial(70.0).resizable(true))
                    .column(Column::remainder())
                    .header(row_h, |mut header| {
                        header.col(|_ui| {});
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_NAME);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_CLASS);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_LEVEL);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_GENDER);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_COURAGE);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_STUPIDITY);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_FLAGS);
                        });
                    })
                    .body(|mut body| {
                        for member in &crew_rows {
                            body.row(row_h, |mut row| {
                                row.col(|ui| {
                                    if show_sack
                                        && ui.small_button(statics::EN_BTN_SACK).clicked()
                                    {
                                        sack_clicked = Some(member.name.clone());
                                    }
                                });
                                row.col(|ui| {
                                    ui.label(&member.name);
                                });
                                row.col(|ui| {
                                    ui.label(&member.profession);
                                });
                                row.col(|ui| {
                                    ui.monospace(member.level.to_string());
                                });
                                row.col(|ui| {
                                    ui.label(&member.gender);
                                });
                                row.col(|ui| {
                                    ui.monospace(Self::format_stat(member.courage));
                                });
                                row.col(|ui| {
                                    ui.monospace(Self::format_stat(member.stupidity));
                                });
                                row.col(|ui| {
                                    ui.label(Self::flags_label(member.veteran, member.badass));
                                });
                            });
                        }
                    });
            });
        });

        // Apply the collected intents now that no panel borrows anything.
        if let Some(list) = tab_clicked {
            self.switch_crew_tab(list);
        }
        if crew_bar_changed {
            self.remember_crew_bar();
        }
        if applicants_bar_changed {
            self.remember_applicants_bar();
        }
        if let Some(name) = hire_clicked {
            self.hire_applicant(&name);
        }
        if let Some(name) = sack_clicked {
            self.sack_crew(&name);
        }
    }
}
