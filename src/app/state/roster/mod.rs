use crate::app::runtime::{AttendanceRecord, AttendanceStatus, SchoolData};
use crate::app::state::picker::{options_from_json, OptionValue, PickerOption};
use crate::app::util::text::contains_ignore_case;

/// Which roster field the open picker will write to on commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterPicker {
    Class,
    Month,
    Status,
    LeaveType,
    Theme,
}

impl RosterPicker {
    pub fn title(self) -> &'static str {
        match self {
            RosterPicker::Class => "Select class",
            RosterPicker::Month => "Select month",
            RosterPicker::Status => "Filter by status",
            RosterPicker::LeaveType => "Leave type",
            RosterPicker::Theme => "Select theme",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AttendanceStatus),
}

impl StatusFilter {
    const ALL_VALUE: &'static str = "all";

    pub fn matches(self, status: AttendanceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn value(self) -> OptionValue {
        OptionValue::from(match self {
            StatusFilter::All => Self::ALL_VALUE,
            StatusFilter::Only(status) => status.as_str(),
        })
    }

    pub fn from_value(value: &OptionValue) -> Option<Self> {
        if value.as_str() == Self::ALL_VALUE {
            return Some(StatusFilter::All);
        }
        AttendanceStatus::parse(value.as_str()).map(StatusFilter::Only)
    }

    pub fn picker_options() -> Vec<PickerOption> {
        let mut options = vec![PickerOption::new("All students", Self::ALL_VALUE)];
        options.extend(
            AttendanceStatus::ALL
                .into_iter()
                .map(|status| PickerOption::new(status.label(), status.as_str())),
        );
        options
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub class_id: Option<OptionValue>,
    pub month: Option<OptionValue>,
    pub status: StatusFilter,
    pub query: String,
}

impl RosterFilter {
    pub fn is_empty(&self) -> bool {
        *self == RosterFilter::default()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttendanceStats {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub unmarked: usize,
}

impl AttendanceStats {
    pub fn record(&mut self, status: AttendanceStatus) {
        self.total += 1;
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Leave => self.leave += 1,
            AttendanceStatus::Unmarked => self.unmarked += 1,
        }
    }

    pub fn marked(&self) -> usize {
        self.present + self.absent + self.leave
    }

    /// Present share of marked students, rounded half up. `None` until someone is marked.
    pub fn attendance_percent(&self) -> Option<u8> {
        let marked = self.marked();
        if marked == 0 {
            return None;
        }
        let percent = (self.present * 100 + marked / 2) / marked;
        u8::try_from(percent).ok()
    }
}

#[derive(Default)]
pub struct RosterState {
    pub records: Vec<AttendanceRecord>,
    pub classes: Vec<PickerOption>,
    pub months: Vec<PickerOption>,
    pub leave_types: Vec<PickerOption>,
    pub filter: RosterFilter,
    pub filtered_indices: Vec<usize>,
    pub rows: Vec<String>,
    pub selected: usize,
    pub search_active: bool,
}

impl RosterState {
    pub fn from_data(data: SchoolData) -> Self {
        let mut roster = RosterState::default();
        roster.replace_data(data);
        roster
    }

    /// Swaps in a fresh payload while keeping filters and the cursor where possible.
    pub fn replace_data(&mut self, data: SchoolData) {
        self.classes = options_from_json(&data.classes);
        self.months = options_from_json(&data.months);
        self.leave_types = options_from_json(&data.leave_types);
        self.records = data.attendance;
        self.rebuild();
    }

    pub fn options_for(&self, picker: RosterPicker) -> Vec<PickerOption> {
        match picker {
            RosterPicker::Class => self.classes.clone(),
            RosterPicker::Month => self.months.clone(),
            RosterPicker::Status => StatusFilter::picker_options(),
            RosterPicker::LeaveType => self.leave_types.clone(),
            RosterPicker::Theme => Vec::new(),
        }
    }

    pub fn rebuild(&mut self) {
        let filter = &self.filter;
        self.filtered_indices = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                if filter
                    .class_id
                    .as_ref()
                    .is_some_and(|class_id| *class_id != record.class_id)
                {
                    return None;
                }
                if filter
                    .month
                    .as_ref()
                    .is_some_and(|month| *month != record.month)
                {
                    return None;
                }
                if !filter.status.matches(record.status) {
                    return None;
                }
                let haystack = format!(
                    "{} {} {}",
                    record.name,
                    label_for(&self.classes, &record.class_id),
                    label_for(&self.months, &record.month)
                );
                contains_ignore_case(&haystack, &filter.query).then_some(index)
            })
            .collect();

        if self.filtered_indices.is_empty() {
            self.selected = 0;
            self.rows = vec!["(no students matched)".to_string()];
            return;
        }
        self.selected = self
            .selected
            .min(self.filtered_indices.len().saturating_sub(1));
        self.rows = self
            .filtered_indices
            .iter()
            .map(|index| self.format_row(&self.records[*index]))
            .collect();
    }

    fn format_row(&self, record: &AttendanceRecord) -> String {
        let status = match (record.status, record.leave_type.as_ref()) {
            (AttendanceStatus::Leave, Some(leave_type)) => {
                format!("{} ({})", record.status.label(), label_for(&self.leave_types, leave_type))
            }
            (status, _) => status.label().to_string(),
        };
        format!(
            "{:<24} {:<12} {:<10} {status}",
            record.name,
            label_for(&self.classes, &record.class_id),
            label_for(&self.months, &record.month)
        )
    }

    pub fn stats(&self) -> AttendanceStats {
        let mut stats = AttendanceStats::default();
        for index in &self.filtered_indices {
            stats.record(self.records[*index].status);
        }
        stats
    }

    pub fn selected_record_index(&self) -> Option<usize> {
        self.filtered_indices.get(self.selected).copied()
    }

    pub fn selected_record(&self) -> Option<&AttendanceRecord> {
        self.selected_record_index()
            .and_then(|index| self.records.get(index))
    }

    /// Applies a status change to the selected student. Returns the student's name.
    pub fn mark_selected(
        &mut self,
        status: AttendanceStatus,
        leave_type: Option<OptionValue>,
    ) -> Option<String> {
        let index = self.selected_record_index()?;
        let record = self.records.get_mut(index)?;
        record.status = status;
        record.leave_type = if status == AttendanceStatus::Leave {
            leave_type
        } else {
            None
        };
        let name = record.name.clone();
        self.rebuild();
        Some(name)
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        let len = self.filtered_indices.len();
        if len == 0 {
            return false;
        }
        let next = if delta.is_negative() {
            self.selected.saturating_sub(delta.unsigned_abs())
        } else {
            self.selected.saturating_add(delta.unsigned_abs()).min(len - 1)
        };
        let changed = next != self.selected;
        self.selected = next;
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.filter.is_empty() {
            return false;
        }
        self.filter = RosterFilter::default();
        self.rebuild();
        true
    }

    pub fn class_label(&self, value: &OptionValue) -> String {
        label_for(&self.classes, value)
    }

    pub fn month_label(&self, value: &OptionValue) -> String {
        label_for(&self.months, value)
    }

    pub fn leave_type_label(&self, value: &OptionValue) -> String {
        label_for(&self.leave_types, value)
    }

    pub fn filter_summary(&self) -> String {
        let class = self
            .filter
            .class_id
            .as_ref()
            .map(|value| self.class_label(value))
            .unwrap_or_else(|| "all".to_string());
        let month = self
            .filter
            .month
            .as_ref()
            .map(|value| self.month_label(value))
            .unwrap_or_else(|| "all".to_string());
        format!(
            "class={class}  month={month}  status={}  query=\"{}\"",
            self.filter.status.label(),
            self.filter.query
        )
    }
}

/// Label of the first option carrying `value`, or the raw value when no option matches.
fn label_for(options: &[PickerOption], value: &OptionValue) -> String {
    options
        .iter()
        .find(|option| option.value == *value)
        .map(|option| option.label.clone())
        .unwrap_or_else(|| value.to_string())
}
