pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const BUTTON_DANGER: &str = "inline-flex items-center justify-center rounded-lg bg-red-600 px-3 py-1 text-sm font-medium text-white hover:bg-red-700";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500 sm:text-sm";
pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_HINT: &str = "text-xs text-gray-500 dark:text-gray-400 mt-1";
pub const ALERT_SUCCESS: &str = "bg-green-50 dark:bg-green-900/50 border border-green-200 dark:border-green-800 rounded-lg p-4 text-green-700 dark:text-green-200";
pub const ALERT_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";
pub const ALERT_WARNING: &str = "p-4 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50 dark:bg-gray-900 dark:text-yellow-400";

// Wheel screens
pub const PAGE: &str = "max-w-3xl mx-auto py-10 flex flex-col items-center gap-6";
pub const PAGE_HEADER: &str = "w-full flex items-center justify-between";
pub const WHEEL_FRAME: &str = "relative flex items-center justify-center";
pub const SPIN_BUTTON: &str = "px-10 py-4 rounded-full font-bold text-lg text-white bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0 transition-all duration-300";
pub const SPIN_BUTTON_DISABLED: &str = "px-10 py-4 rounded-full font-bold text-lg text-white bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed";
pub const MODAL_BACKDROP: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/50 backdrop-blur-sm";
pub const MODAL_CARD: &str = "bg-white dark:bg-gray-800 rounded-2xl shadow-xl p-8 max-w-sm w-full mx-4 text-center space-y-4";
pub const SEGMENT_ROW: &str = "flex items-center justify-between gap-3 py-2 border-b border-gray-100 dark:border-gray-700 last:border-0";
pub const COLOR_SWATCH: &str = "w-6 h-6 rounded-full border border-gray-300 dark:border-gray-600 shrink-0";
pub const COLOR_OPTION: &str = "w-8 h-8 rounded-full border-2 border-transparent hover:scale-110 transition-transform";
pub const COLOR_OPTION_SELECTED: &str = "w-8 h-8 rounded-full border-2 border-gray-900 dark:border-white scale-110";
