pub const BANNER: &str = "Library catalog. Type to search, :help for commands.";

pub const HELP: &str = "\
Commands:
  <text>                 type into the search box (searches after a pause)
  :search, :s            search now
  :page N, :p N          go to page N
  :filter NAME [VALUE]   set a filter, or clear it when VALUE is omitted
  :edit ID               open the edit form for a book
  :set FIELD VALUE       change a field in the open form
  :save                  submit the open form
  :cancel                close the open form
  :delete ID             delete a book
  :html                  print the result area as HTML
  :help, :h, :?          show this help
  :quit, :q              leave";

pub const COLUMN_SEPARATOR: &str = " | ";
pub const LOADING: &str = "...";
